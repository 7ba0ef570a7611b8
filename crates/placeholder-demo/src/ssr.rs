//! Server-side demo: plays the animation on an in-memory input against a
//! virtual clock and prints every frame.
use mogwai_placeholder::ssr::prelude::*;

fn main() {
    env_logger::init();

    let hints = std::env::args().skip(1).collect::<Vec<_>>();
    let hints = if hints.is_empty() {
        placeholder_demo::search_hints(false)
    } else {
        serde_json::json!(hints)
    };

    let input = SsrInput::with_id("search");
    let clock = ManualClock::new();
    let config = PlaceholderConfig::from_binding(&hints, None).with_seed(0);
    let count = config.hints.len();
    let placeholder = Placeholder::attach(input.clone(), clock.clone(), config);

    let mut completed = 0;
    while completed < count {
        let Some(kind) = clock.run_next() else {
            println!("nothing to type");
            return;
        };
        let state = placeholder.state();
        println!("{:>6}ms {:?}\t{}", clock.now(), kind, input.html_string());
        if kind == TimerKind::Typing && state.phase == Phase::Dwelling {
            completed += 1;
        }
    }

    placeholder.suspend();
    println!("{:>6}ms focus\t{}", clock.now(), input.html_string());
}
