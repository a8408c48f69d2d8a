use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly shuffled copy of `items`, leaving the input untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<i64> = (1..=50).collect();

        for _ in 0..20 {
            let mut result = shuffled(&items, &mut rng);
            assert_eq!(result.len(), items.len());
            result.sort();
            assert_eq!(result, items);
        }
    }

    #[test]
    fn test_shuffle_keeps_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = vec!["a", "b", "c"];
        let _ = shuffled(&items, &mut rng);
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(shuffled::<i32, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // The first element should land in each slot over enough runs
        let mut rng = StdRng::seed_from_u64(99);
        let items = [0, 1, 2, 3];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let result = shuffled(&items, &mut rng);
            let pos = result.iter().position(|&x| x == 0).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
