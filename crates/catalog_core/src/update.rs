use crate::{Effect, Msg, Paginator, RunState};

/// Pure update function: applies a message to the pagination state and
/// returns the effects the crawl loop must perform, in order.
///
/// Messages that arrive after the run has stopped, or that name a page other
/// than the one in flight, are ignored. Once a terminal state is reached no
/// further `FetchPage` effect is ever produced.
pub fn update(mut state: Paginator, msg: Msg) -> (Paginator, Vec<Effect>) {
    let effects = match msg {
        Msg::Start => {
            if state.has_started() {
                return (state, Vec::new());
            }
            if state.max_pages() == 0 {
                state.stop(RunState::Completed);
                vec![Effect::Finish]
            } else {
                let (page, url) = state.advance();
                vec![Effect::FetchPage { page, url }]
            }
        }
        Msg::PageExtracted { page, records } => {
            if !state.is_awaiting(page) {
                return (state, Vec::new());
            }

            let count = records.len();
            state.append(records);
            // One pause per record, including the last record of the page.
            let mut effects = vec![Effect::Pause; count];

            if count == 0 {
                state.stop(RunState::StoppedOnEmptyPage { page });
                effects.push(Effect::Finish);
            } else if page >= state.max_pages() {
                state.stop(RunState::StoppedOnMaxPages { pages: page });
                effects.push(Effect::Finish);
            } else {
                let (page, url) = state.advance();
                effects.push(Effect::FetchPage { page, url });
            }
            effects
        }
        Msg::PageFailed { page, error } => {
            if !state.is_awaiting(page) {
                return (state, Vec::new());
            }
            state.stop(RunState::StoppedOnError { page, error });
            vec![Effect::Finish]
        }
    };

    (state, effects)
}
