//! Useful elementary array / vec based functions

/// Minimum and maximum of a sequence, `None` if empty.
pub fn min_max<T: Ord + Copy>(values: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// Elements of `values` where `mask` is true.
pub fn compress<T: Clone>(mask: &[bool], values: &[T]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter(|(_, &keep)| keep)
        .map(|(v, _)| v.clone())
        .collect()
}

/// Elements of `values` where `mask` is false.
pub fn compress_not<T: Clone>(mask: &[bool], values: &[T]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter(|(_, &keep)| !keep)
        .map(|(v, _)| v.clone())
        .collect()
}

pub fn count_true(mask: &[bool]) -> usize {
    mask.iter().filter(|&&b| b).count()
}
