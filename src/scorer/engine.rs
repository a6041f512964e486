use crate::config::MissingPolicy;
use crate::dataset::ZipRecord;
use crate::metrics::Column;

/// Weighted mean of one record's normalized values over `terms`.
///
/// `terms` holds only positive weights. Returns `None` when the record cannot
/// be scored: a missing term under `MissingPolicy::Drop`, or no weighted term
/// left under `MissingPolicy::Exclude`.
///
/// Weights are divided by the largest one before accumulating, so the sums
/// stay finite for any finite weights and the result is scale-invariant.
#[inline]
pub fn weighted_mean(
    record: &ZipRecord,
    terms: &[(Column, f64)],
    policy: MissingPolicy,
) -> Option<f64> {
    let scale = terms.iter().map(|&(_, w)| w).fold(0.0, f64::max);
    if scale <= 0.0 {
        return None;
    }

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for &(column, weight) in terms {
        match record.normalized(column) {
            Some(value) => {
                let w = weight / scale;
                numerator += w * value;
                denominator += w;
            }
            None => match policy {
                MissingPolicy::Exclude => continue,
                MissingPolicy::Drop => return None,
            },
        }
    }

    if denominator > 0.0 {
        Some((numerator / denominator).clamp(0.0, 1.0))
    } else {
        None
    }
}
