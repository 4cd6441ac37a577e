//! Final standings, ordered by survival time.
//!
//! Pure data: the presentation layer decides how to draw the table.

use serde::Serialize;

use crate::color::{Rgb, color_name};
use crate::consts::TICK_HZ;
use crate::sim::state::EliminatedBall;

/// How a ball's run ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Finish {
    /// Outlived everyone; always ranked first
    Survivor,
    Eliminated { survival_secs: f32 },
}

/// One row of the standings table
#[derive(Debug, Clone, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub name: &'static str,
    pub color: Rgb,
    pub finish: Finish,
}

impl RankingRow {
    /// Time column text: the winner shows a label instead of a time
    pub fn time_label(&self) -> String {
        match self.finish {
            Finish::Survivor => "Survivor".to_string(),
            Finish::Eliminated { survival_secs } => format!("{survival_secs:.1}s"),
        }
    }
}

/// Build the standings: the survivor first regardless of its own time, then
/// the eliminated balls in descending order of survival time.
pub fn standings(winner_color: Rgb, eliminated: &[EliminatedBall]) -> Vec<RankingRow> {
    let mut rows = Vec::with_capacity(eliminated.len() + 1);
    rows.push(RankingRow {
        rank: 1,
        name: color_name(winner_color),
        color: winner_color,
        finish: Finish::Survivor,
    });

    let mut by_survival: Vec<&EliminatedBall> = eliminated.iter().collect();
    by_survival.sort_by(|a, b| b.survival_ticks.cmp(&a.survival_ticks));

    for (i, ball) in by_survival.iter().enumerate() {
        rows.push(RankingRow {
            rank: i + 2,
            name: color_name(ball.color),
            color: ball.color,
            finish: Finish::Eliminated {
                survival_secs: ball.survival_ticks as f32 / TICK_HZ as f32,
            },
        });
    }

    rows
}
