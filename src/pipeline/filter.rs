use crate::{prompt::YesNoPrompt, stage, types::Stage};

/// Asks about every artist in order and keeps the ones answered with yes.
///
/// The accepted artists keep the order of `artists`. The filter itself does
/// no I/O beyond what `prompt` does.
pub fn filter_artists<P>(artists: &[String], prompt: &mut P) -> Vec<String>
where
    P: YesNoPrompt + ?Sized,
{
    let mut accepted = Vec::new();

    for artist in artists {
        if prompt.ask_yes_no(&format!("Include artist: {}?", artist)) {
            accepted.push(artist.clone());
        } else {
            stage!(Stage::Filter, "✗ Rejected artist: {}", artist);
        }
    }

    stage!(Stage::Filter, "✓ Accepted {} artists", accepted.len());
    accepted
}
