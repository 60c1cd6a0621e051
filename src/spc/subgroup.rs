//! Subgroup partitioning.

/// Splits `samples` into consecutive subgroups of `capacity` elements and
/// keeps the first `num_groups` of them.
///
/// A trailing run shorter than `capacity` is dropped, never padded, so every
/// returned subgroup has exactly `capacity` elements. A `capacity` of 0 is
/// treated as 1.
///
/// # Examples
///
/// ```
/// use u_spc::spc::partition;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
/// let groups = partition(&data, 10, 3);
/// assert_eq!(groups, vec![&[1.0, 2.0, 3.0][..], &[4.0, 5.0, 6.0][..]]);
///
/// let groups = partition(&data, 1, 3);
/// assert_eq!(groups.len(), 1);
/// ```
pub fn partition<T>(samples: &[T], num_groups: usize, capacity: usize) -> Vec<&[T]> {
    samples
        .chunks_exact(capacity.max(1))
        .take(num_groups)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn groups_have_full_capacity(
            data in proptest::collection::vec(-1e3_f64..1e3, 0..=200),
            num_groups in 0_usize..40,
            capacity in 1_usize..30,
        ) {
            let groups = partition(&data, num_groups, capacity);
            prop_assert_eq!(groups.len(), num_groups.min(data.len() / capacity));
            for g in &groups {
                prop_assert_eq!(g.len(), capacity);
            }
        }
    }
}
