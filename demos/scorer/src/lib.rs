#![allow(non_snake_case)]
//! Scoreboard with one counter per player. Each row is its own piece of
//! component-local state; clicking a row bumps only that row's score.

use reprise_core::*;
use reprise_ui::*;

/// One clickable score row bound to `score`.
fn ScoreLine(player: u8, score: &Signal<u32>) -> View {
    let label = format!("Player {player}: {score}");
    Text(label.clone()).modifier(
        Modifier::new()
            .padding_values(PaddingValues {
                left: 1.0,
                right: 1.0,
                ..Default::default()
            })
            .semantics(Semantics::new(Role::Text).label(label))
            .clickable({
                let score = score.clone();
                move || score.update(|s| *s = s.saturating_add(1))
            }),
    )
}

pub fn Scorer() -> View {
    remember(|| {
        effect(|| {
            log::info!("Scorer mounted");
            on_unmount(|| log::info!("Scorer unmounted"))
        })
    });

    // One slot per player; neither update touches the other.
    let player1 = remember(|| signal(0u32));
    let player2 = remember(|| signal(0u32));

    Column(Modifier::new().fill_max_width()).child((
        ScoreLine(1, &player1),
        ScoreLine(2, &player2),
    ))
}

pub fn app(_s: &mut Scheduler) -> View {
    Surface(
        Modifier::new().fill_max_size().padding(1.0),
        Scorer(),
    )
}
