use std::path::PathBuf;
use std::time::Duration;

use catalog_core::{update, Msg, Paginator, ScrapeConfig, SelectorSet};

fn config(max_pages: u32) -> ScrapeConfig {
    ScrapeConfig {
        base_url: "http://x/catalog".into(),
        selectors: SelectorSet {
            item: ".product".into(),
            title: ".title".into(),
            price: ".price".into(),
        },
        wait_time: Duration::ZERO,
        max_pages,
        output_file: PathBuf::from("out.json"),
        log_to_console: false,
    }
}

#[test]
fn page_message_before_start_is_noop() {
    let state = Paginator::new(&config(3));
    let (next, effects) = update(
        state.clone(),
        Msg::PageExtracted {
            page: 1,
            records: Vec::new(),
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn second_start_is_noop() {
    let (state, _) = update(Paginator::new(&config(3)), Msg::Start);
    let (next, effects) = update(state.clone(), Msg::Start);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
