//! Turn-to-phase mapping.

use kahovitz_core::{Phase, PhasePlan, PhaseSelection};

/// Select the narrative phase for a turn.
///
/// Phase boundaries are `floor(total * 0.25)`, `floor(total * 0.5)`,
/// `floor(total * 0.75)` and `total`; a turn belongs to the first phase whose
/// boundary is at or above it. Turns past `total` fall into the resolution.
///
/// # Examples
///
/// ```
/// use kahovitz_core::{Phase, PhasePlan};
/// use kahovitz_story::select_phase;
///
/// let plan = PhasePlan::default();
/// assert_eq!(*select_phase(&plan, 20, 5).phase(), Phase::Setup);
/// assert_eq!(*select_phase(&plan, 20, 6).phase(), Phase::RisingAction);
/// assert_eq!(*select_phase(&plan, 20, 15).phase(), Phase::Climax);
/// assert_eq!(*select_phase(&plan, 20, 16).phase(), Phase::Resolution);
/// ```
pub fn select_phase(plan: &PhasePlan, total_turns: usize, current_turn: usize) -> PhaseSelection {
    let thresholds = [
        (Phase::Setup, total_turns / 4),
        (Phase::RisingAction, total_turns / 2),
        (Phase::Climax, total_turns * 3 / 4),
        (Phase::Resolution, total_turns),
    ];

    let phase = thresholds
        .iter()
        .find(|(_, threshold)| current_turn <= *threshold)
        .map(|(phase, _)| *phase)
        .unwrap_or(Phase::Resolution);

    PhaseSelection::new(phase, plan.description(phase))
}
