//! Header, sidebar and footer state driven by turn events.

use derive_getters::Getters;
use pairs_core::{Player, RoundOutcome, Scores, SeriesTally, TurnEvent};
use std::time::Duration;
use tracing::{debug, instrument};

/// Marker that slides between the two player labels.
///
/// Position 0.0 sits under player 1, 1.0 under player 2.
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct TurnIndicator {
    position: f64,
    target: f64,
    speed: f64,
}

impl TurnIndicator {
    /// Indicator resting on player 1, moving `speed` full slides per second.
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed,
        }
    }

    fn anchor(player: Player) -> f64 {
        match player {
            Player::One => 0.0,
            Player::Two => 1.0,
        }
    }

    /// Starts sliding towards `player`.
    pub fn point_at(&mut self, player: Player) {
        self.target = Self::anchor(player);
    }

    /// Jumps straight to `player` without animating.
    pub fn snap_to(&mut self, player: Player) {
        self.target = Self::anchor(player);
        self.position = self.target;
    }

    /// Advances the slide by `dt`.
    pub fn update(&mut self, dt: Duration) {
        let step = self.speed * dt.as_secs_f64();
        let remaining = self.target - self.position;
        if remaining.abs() <= step {
            self.position = self.target;
        } else {
            self.position += step.copysign(remaining);
        }
    }

    /// Whether the slide is still in progress.
    pub fn is_moving(&self) -> bool {
        self.position != self.target
    }
}

/// Turn indicator, live scores and the round result.
#[derive(Debug, Clone, Getters)]
pub struct Header {
    indicator: TurnIndicator,
    current_player: Player,
    scores: Scores,
    outcome: RoundOutcome,
}

impl Header {
    /// Header for a fresh round.
    pub fn new(indicator_speed: f64) -> Self {
        let mut indicator = TurnIndicator::new(indicator_speed);
        indicator.snap_to(Player::One);
        Self {
            indicator,
            current_player: Player::One,
            scores: Scores::default(),
            outcome: RoundOutcome::Ongoing,
        }
    }

    /// Follows the turn that just resolved.
    #[instrument(skip(self, event), fields(player = %event.current_player, outcome = %event.outcome))]
    pub fn apply(&mut self, event: &TurnEvent) {
        self.current_player = event.current_player;
        self.scores = event.scores;
        self.outcome = event.outcome;
        if event.outcome.is_over() {
            debug!("Showing round result");
        } else {
            self.indicator.point_at(event.current_player);
        }
    }

    /// Back to player 1 with no result shown. The marker slides home.
    pub fn reset(&mut self) {
        self.current_player = Player::One;
        self.scores = Scores::default();
        self.outcome = RoundOutcome::Ongoing;
        self.indicator.point_at(Player::One);
    }

    /// Animation step.
    pub fn update(&mut self, dt: Duration) {
        self.indicator.update(dt);
    }

    /// Result line once the round has ended.
    pub fn result_text(&self) -> Option<String> {
        self.outcome.is_over().then(|| self.outcome.to_string())
    }
}

/// Win and tie counters across rounds.
#[derive(Debug, Clone, Default, Getters)]
pub struct Sidebar {
    tally: SeriesTally,
}

impl Sidebar {
    /// Counts the round if `event` ended it.
    pub fn apply(&mut self, event: &TurnEvent) {
        if event.outcome.is_over() {
            self.tally.record(event.outcome);
            debug!(rounds = self.tally.rounds(), "Series tally updated");
        }
    }

    /// Label and value for each counter, in display order.
    pub fn counters(&self) -> [(&'static str, u32); 3] {
        [
            ("Player 1 wins", self.tally.wins(Player::One)),
            ("Player 2 wins", self.tally.wins(Player::Two)),
            ("Ties", *self.tally.ties()),
        ]
    }
}

/// Restart button and credits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Footer;

impl Footer {
    /// Text on the restart button.
    pub const RESTART_LABEL: &'static str = "[ Restart ]";

    /// Credits line.
    pub const CREDITS: &'static str =
        "Pairs Duel | after Jogo da Memória by Fábio Pichler (www.fabiopichler.net)";
}
