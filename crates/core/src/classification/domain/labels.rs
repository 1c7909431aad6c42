use std::fmt;

/// Gender labels in network output order. Reordering breaks predictions.
pub const GENDER_LABELS: &[&str] = &["Male", "Female"];

/// Age-range labels in network output order. Reordering breaks predictions.
pub const AGE_LABELS: &[&str] = &[
    "(0-2)", "(4-6)", "(8-12)", "(15-20)", "(25-32)", "(38-43)", "(48-53)", "(60-100)",
];

/// Predicted attributes for one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub gender: &'static str,
    pub age: &'static str,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.gender, self.age)
    }
}

/// Index of the largest score; the first one wins ties and NaN never wins.
///
/// Returns `None` for an empty slice or one containing only NaN.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &s) in scores.iter().enumerate() {
        if s.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}

/// Picks the label matching the highest score.
///
/// The score vector must have exactly one entry per label.
pub fn select_label(
    scores: &[f32],
    labels: &'static [&'static str],
) -> Result<&'static str, Box<dyn std::error::Error>> {
    if scores.len() != labels.len() {
        return Err(format!(
            "Network produced {} scores for {} labels",
            scores.len(),
            labels.len()
        )
        .into());
    }
    let idx = argmax(scores).ok_or("Network produced no usable scores")?;
    Ok(labels[idx])
}
