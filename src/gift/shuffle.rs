//! Presentation-time option shuffling.

use rand::seq::SliceRandom;

/// Uniformly shuffle an option list and recompute the correct index.
///
/// The input is not mutated. If `correct_index` is out of bounds, or the
/// correct option cannot be located by value equality after shuffling
/// (which should not occur under correct usage), the call is a no-op
/// returning the original ordering and index rather than failing.
pub fn shuffle_options<T: Clone + PartialEq>(options: &[T], correct_index: usize) -> (Vec<T>, usize) {
    let Some(correct) = options.get(correct_index) else {
        tracing::warn!(
            correct_index,
            len = options.len(),
            "correct index out of bounds, leaving options in place"
        );
        return (options.to_vec(), correct_index);
    };
    let correct = correct.clone();

    let mut shuffled = options.to_vec();
    shuffled.shuffle(&mut rand::rng());

    match shuffled.iter().position(|option| *option == correct) {
        Some(new_index) => (shuffled, new_index),
        None => {
            tracing::warn!("correct option lost after shuffling, leaving options in place");
            (options.to_vec(), correct_index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_not_mutated() {
        let options = vec!["a", "b", "c", "d"];
        let before = options.clone();
        let _ = shuffle_options(&options, 2);
        assert_eq!(options, before);
    }

    #[test]
    fn test_out_of_bounds_index_is_noop() {
        let options = vec!["a", "b"];
        let (shuffled, index) = shuffle_options(&options, 7);
        assert_eq!(shuffled, options);
        assert_eq!(index, 7);
    }

    #[test]
    fn test_empty_list_is_noop() {
        let (shuffled, index) = shuffle_options::<String>(&[], 0);
        assert!(shuffled.is_empty());
        assert_eq!(index, 0);
    }
}
