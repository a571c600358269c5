use crate::comm::Communicator;
use crate::eom::ranking;
use crate::scalar::Field;
use itertools::Itertools;

/// Two-phase selection of the globally lowest diagonal elements over data
/// sharded across the world's ranks: every rank sorts its own elements and
/// keeps the first `trial_count`, the pruned lists are gathered on the
/// root, and the root sorts the concatenation into one globally ranked
/// candidate list. Non-root ranks return an empty list.
///
/// The local prune is a funnel heuristic, not an exact algorithm: if one
/// rank owns more than `trial_count` of the true globally lowest elements,
/// the merged list is silently incomplete. The caller observes this, if at
/// all, as premature candidate-pool exhaustion.
pub fn lowest_elements<F: Field, C: Communicator<F>>(
    mut local: Vec<(usize, F)>,
    trial_count: usize,
    comm: &C,
) -> Vec<(usize, F)> {
    local.sort_unstable_by(ranking::compare);
    local.truncate(trial_count);
    comm.gather(&local)
        .into_iter()
        .sorted_by(ranking::compare)
        .collect()
}

#[cfg(test)]
mod test {
    use super::lowest_elements;
    use crate::comm::{Communicator, SerialWorld};
    use crate::eom::ranking;

    /// Emulates the gather of a world whose ranks contribute the given
    /// pruned lists; the broadcast replays the root's list like any world.
    struct ShardWorld {
        rank: usize,
        pruned: Vec<Vec<(usize, f64)>>,
    }

    impl Communicator<f64> for ShardWorld {
        fn rank(&self) -> usize {
            self.rank
        }

        fn size(&self) -> usize {
            self.pruned.len()
        }

        fn gather(&self, local: &[(usize, f64)]) -> Vec<(usize, f64)> {
            if self.rank == 0 {
                assert_eq!(self.pruned[0], local);
                self.pruned.iter().flatten().copied().collect()
            } else {
                Vec::new()
            }
        }

        fn broadcast(&self, local: &[(usize, f64)]) -> Vec<(usize, f64)> {
            local.to_vec()
        }
    }

    fn prune(mut elements: Vec<(usize, f64)>, count: usize) -> Vec<(usize, f64)> {
        elements.sort_unstable_by(ranking::compare);
        elements.truncate(count);
        elements
    }

    #[test]
    fn serial_world_returns_the_full_ranked_list() {
        let elements = vec![(0, 4.0), (1, -1.0), (2, 2.0), (3, 1.0e-16)];
        let ranked = lowest_elements(elements, 10, &SerialWorld);
        let indices: Vec<usize> = ranked.iter().map(|c| c.0).collect();
        assert_eq!(indices, vec![1, 2, 0, 3]);
    }

    #[test]
    fn truncation_keeps_only_the_local_lowest() {
        let elements = vec![(0, 4.0), (1, -1.0), (2, 2.0), (3, -5.0)];
        let ranked = lowest_elements(elements, 2, &SerialWorld);
        let indices: Vec<usize> = ranked.iter().map(|c| c.0).collect();
        assert_eq!(indices, vec![3, 1]);
    }

    #[test]
    fn funnel_merges_shards_into_one_global_order() {
        let shards: Vec<Vec<(usize, f64)>> = vec![
            vec![(0, 3.0), (1, -2.0), (2, 7.0)],
            vec![(3, -4.0), (4, 0.5), (5, 1.0e-15)],
            vec![(6, -2.0), (7, 12.0)],
        ];
        let trial_count: usize = 2;
        let pruned: Vec<Vec<(usize, f64)>> = shards
            .iter()
            .map(|shard| prune(shard.clone(), trial_count))
            .collect();

        // the root observes the globally merged ranking
        let root = ShardWorld {
            rank: 0,
            pruned: pruned.clone(),
        };
        let merged = lowest_elements(shards[0].clone(), trial_count, &root);
        let indices: Vec<usize> = merged.iter().map(|c| c.0).collect();
        assert_eq!(indices, vec![3, 1, 6, 4, 0, 7]);

        // every other rank returns an empty list
        let off_root = ShardWorld { rank: 1, pruned };
        assert!(lowest_elements(shards[1].clone(), trial_count, &off_root).is_empty());
    }
}
