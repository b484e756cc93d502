use psee_core::DirectionLabel;

/// Map the two independence p-values to a direction label.
///
/// Precedence: a clean threshold split wins; otherwise the larger p-value
/// wins with a weak label; equal p-values are inconclusive.
pub fn decide(p_forward: f64, p_backward: f64, alpha: f64) -> DirectionLabel {
    if p_forward > alpha && p_backward <= alpha {
        DirectionLabel::Forward
    } else if p_backward > alpha && p_forward <= alpha {
        DirectionLabel::Backward
    } else if p_forward > p_backward {
        DirectionLabel::WeakForward
    } else if p_backward > p_forward {
        DirectionLabel::WeakBackward
    } else {
        DirectionLabel::Inconclusive
    }
}
