//! The steps of one BWO generation.
//!
//! Each step is a free function over plain `Vec<f64>` candidates so it can
//! be tested in isolation. [`super::BwoRunner`] chains them:
//!
//! 1. [`initialize_population`] (once)
//! 2. [`find_best`] to track the incumbent
//! 3. [`select_parents`]: the `N_R` fittest candidates
//! 4. [`reproduce`]: `N_R` children via single-point [`crossover`]
//! 5. [`cannibalize`]: overwrite leading children with elite parents
//! 6. [`mutate`]: perturbed copies of random children
//! 7. [`merge`]: children followed by mutants
//!
//! # References
//!
//! - Hayyolalam & Pourhaji Kazem (2020), "Black Widow Optimization
//!   Algorithm: A novel meta-heuristic approach for solving engineering
//!   optimization problems", *Eng. Appl. Artif. Intell.* 87, 103249

use super::bounds::Bounds;
use rand::Rng;

/// Ranking key: non-finite fitness sorts after every finite value.
fn rank_key(fitness: f64) -> f64 {
    if fitness.is_finite() {
        fitness
    } else {
        f64::INFINITY
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Samples `n` candidates of length `dimension`, each component uniform in
/// its bounds range.
pub fn initialize_population<R: Rng>(
    n: usize,
    dimension: usize,
    bounds: &Bounds,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| {
            (0..dimension)
                .map(|j| {
                    let (lo, hi) = bounds.range(j);
                    rng.random_range(lo..=hi)
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// Best tracking
// ============================================================================

/// Returns the candidate with the lowest finite fitness.
///
/// Ties go to the first occurrence. Returns `None` when no fitness is
/// finite.
pub fn find_best<'a>(population: &'a [Vec<f64>], fitness: &[f64]) -> Option<(&'a [f64], f64)> {
    debug_assert_eq!(population.len(), fitness.len());
    fitness
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, f)| f.is_finite())
        .fold(None, |best: Option<(usize, f64)>, (i, f)| match best {
            Some((_, b)) if b <= f => best,
            _ => Some((i, f)),
        })
        .map(|(i, f)| (population[i].as_slice(), f))
}

// ============================================================================
// Selection
// ============================================================================

/// Returns the `n_r` fittest candidates, best first.
///
/// Sorting is stable, so equal fitness keeps population order. Non-finite
/// fitness ranks last.
pub fn select_parents(population: &[Vec<f64>], fitness: &[f64], n_r: usize) -> Vec<Vec<f64>> {
    debug_assert_eq!(population.len(), fitness.len());
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        rank_key(fitness[a])
            .partial_cmp(&rank_key(fitness[b]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
        .into_iter()
        .take(n_r)
        .map(|i| population[i].clone())
        .collect()
}

// ============================================================================
// Reproduction
// ============================================================================

/// Single-point crossover: `parent1[..point]` followed by `parent2[point..]`.
///
/// # Panics
/// Panics if the parents differ in length or `point` is not in
/// `1..parent1.len()`.
pub fn crossover(parent1: &[f64], parent2: &[f64], point: usize) -> Vec<f64> {
    let d = parent1.len();
    assert_eq!(d, parent2.len(), "parents must have equal length");
    assert!(
        point >= 1 && point < d,
        "crossover point {point} outside [1, {}]",
        d.saturating_sub(1)
    );

    let mut child = Vec::with_capacity(d);
    child.extend_from_slice(&parent1[..point]);
    child.extend_from_slice(&parent2[point..]);
    child
}

/// Produces one child per parent.
///
/// Each child crosses two distinct parents drawn uniformly at random, cut
/// at a point uniform in `[1, D-1]`.
///
/// # Panics
/// Panics if there are fewer than two parents or `D < 2`.
pub fn reproduce<R: Rng>(parents: &[Vec<f64>], rng: &mut R) -> Vec<Vec<f64>> {
    let n_r = parents.len();
    assert!(n_r >= 2, "reproduction needs at least two parents");

    (0..n_r)
        .map(|_| {
            let (p1, p2) = distinct_pair(n_r, rng);
            let d = parents[p1].len();
            let point = rng.random_range(1..d);
            crossover(&parents[p1], &parents[p2], point)
        })
        .collect()
}

/// Two different indices in `0..n`, uniform over ordered pairs.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

// ============================================================================
// Cannibalism
// ============================================================================

/// Overwrites the first `count` children with the first `count` parents.
///
/// `parents` must be in fitness order, as returned by [`select_parents`].
pub fn cannibalize(children: &mut [Vec<f64>], parents: &[Vec<f64>], count: usize) {
    for (child, elite) in children.iter_mut().zip(parents).take(count) {
        child.clone_from(elite);
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Creates `count` mutants.
///
/// Each mutant is a copy of a child chosen uniformly with replacement, with
/// independent uniform noise in `[-1, 1]` added to every component. The
/// children are only read.
pub fn mutate<R: Rng>(children: &[Vec<f64>], count: usize, rng: &mut R) -> Vec<Vec<f64>> {
    if children.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let mut mutant = children[rng.random_range(0..children.len())].clone();
            for gene in &mut mutant {
                *gene += rng.random_range(-1.0..=1.0);
            }
            mutant
        })
        .collect()
}

// ============================================================================
// Merge
// ============================================================================

/// Next generation: children followed by mutants.
pub fn merge(mut children: Vec<Vec<f64>>, mutants: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    children.extend(mutants);
    children
}

/// Resizes `population` to `target`.
///
/// Extra candidates are dropped from the end; missing ones are filled with
/// copies of `elites`, cycling in order.
pub fn normalize_size(population: &mut Vec<Vec<f64>>, target: usize, elites: &[Vec<f64>]) {
    if population.len() >= target {
        population.truncate(target);
        return;
    }
    if elites.is_empty() {
        return;
    }
    let missing = target - population.len();
    population.extend(elites.iter().cycle().take(missing).cloned());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // ---- initialize_population ----

    #[test]
    fn test_initialize_shape_and_bounds() {
        let pop = initialize_population(10, 2, &Bounds::uniform(-5.0, 5.0), &mut rng());
        assert_eq!(pop.len(), 10);
        for cand in &pop {
            assert_eq!(cand.len(), 2);
            for &v in cand {
                assert!((-5.0..=5.0).contains(&v), "component {v} out of bounds");
            }
        }
    }

    #[test]
    fn test_initialize_per_dimension_bounds() {
        let bounds = Bounds::per_dimension(vec![(0.0, 1.0), (100.0, 101.0), (-3.0, -2.0)]);
        let pop = initialize_population(200, 3, &bounds, &mut rng());
        assert!(pop.iter().all(|c| bounds.contains(c)));
    }

    #[test]
    fn test_initialize_deterministic() {
        let b = Bounds::default();
        let a = initialize_population(5, 4, &b, &mut rng());
        let c = initialize_population(5, 4, &b, &mut rng());
        assert_eq!(a, c);
    }

    // ---- find_best ----

    #[test]
    fn test_find_best_minimum() {
        let pop = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let (x, f) = find_best(&pop, &[3.0, -1.0, 2.0]).unwrap();
        assert_eq!(x, &[1.0, 1.0]);
        assert_eq!(f, -1.0);
    }

    #[test]
    fn test_find_best_first_tie_wins() {
        let pop = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let (x, _) = find_best(&pop, &[5.0, 1.0, 1.0]).unwrap();
        assert_eq!(x, &[1.0, 1.0]);
    }

    #[test]
    fn test_find_best_skips_non_finite() {
        let pop = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let fitness = [f64::NAN, f64::NEG_INFINITY, 7.0];
        let (x, f) = find_best(&pop, &fitness).unwrap();
        assert_eq!(x, &[2.0, 2.0]);
        assert_eq!(f, 7.0);
    }

    #[test]
    fn test_find_best_none_when_all_non_finite() {
        let pop = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        assert!(find_best(&pop, &[f64::NAN, f64::INFINITY]).is_none());
    }

    // ---- select_parents ----

    #[test]
    fn test_select_parents_count_and_order() {
        let pop: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64, 0.0]).collect();
        // Fitness descending, so the last candidates are best.
        let fitness: Vec<f64> = (0..50).map(|i| (50 - i) as f64).collect();
        let parents = select_parents(&pop, &fitness, 30);
        assert_eq!(parents.len(), 30);
        assert_eq!(parents[0], vec![49.0, 0.0]);
        assert_eq!(parents[29], vec![20.0, 0.0]);
    }

    #[test]
    fn test_select_parents_stable() {
        let pop = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]];
        let parents = select_parents(&pop, &[2.0, 1.0, 2.0, 1.0], 4);
        let firsts: Vec<f64> = parents.iter().map(|p| p[0]).collect();
        assert_eq!(firsts, vec![1.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn test_select_parents_non_finite_last() {
        let pop = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]];
        let fitness = [f64::NAN, 1e300, f64::NEG_INFINITY, 5.0];
        let parents = select_parents(&pop, &fitness, 3);
        let firsts: Vec<f64> = parents.iter().map(|p| p[0]).collect();
        assert_eq!(firsts, vec![3.0, 1.0, 0.0]);
    }

    // ---- crossover / reproduce ----

    #[test]
    fn test_crossover_prefix_suffix() {
        let p1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let p2 = [10.0, 20.0, 30.0, 40.0, 50.0];
        for cp in 1..5 {
            let child = crossover(&p1, &p2, cp);
            assert_eq!(child.len(), 5);
            assert_eq!(&child[..cp], &p1[..cp]);
            assert_eq!(&child[cp..], &p2[cp..]);
        }
    }

    #[test]
    #[should_panic(expected = "crossover point")]
    fn test_crossover_rejects_zero_point() {
        crossover(&[1.0, 2.0], &[3.0, 4.0], 0);
    }

    #[test]
    fn test_reproduce_children_are_splices() {
        let parents: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64; 4]).collect();
        let children = reproduce(&parents, &mut rng());
        assert_eq!(children.len(), 6);
        for child in &children {
            assert_eq!(child.len(), 4);
            // Head from one parent, tail from a different one.
            let head = child[0];
            let tail = child[3];
            assert_ne!(head, tail, "child {child:?} must mix two distinct parents");
            let cut = child.iter().position(|&v| v != head).unwrap();
            assert!((1..4).contains(&cut));
            assert!(child[cut..].iter().all(|&v| v == tail));
        }
    }

    #[test]
    fn test_distinct_pair_never_equal() {
        let mut r = rng();
        for _ in 0..1000 {
            let (a, b) = distinct_pair(2, &mut r);
            assert_ne!(a, b);
            assert!(a < 2 && b < 2);
        }
    }

    // ---- cannibalize ----

    #[test]
    fn test_cannibalize_overwrites_prefix() {
        let parents = vec![vec![9.0, 9.0], vec![8.0, 8.0], vec![7.0, 7.0]];
        let mut children = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        cannibalize(&mut children, &parents, 2);
        assert_eq!(children, vec![vec![9.0, 9.0], vec![8.0, 8.0], vec![2.0, 2.0]]);
    }

    #[test]
    fn test_cannibalize_count_above_children_replaces_all() {
        let parents: Vec<Vec<f64>> = (0..5).map(|i| vec![-(i as f64); 2]).collect();
        let mut children: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64 + 10.0; 2]).collect();
        // D = 20, rate 0.5 against N_R = 5
        cannibalize(&mut children, &parents, 10);
        assert_eq!(children, parents);
    }

    #[test]
    fn test_cannibalize_zero_is_noop() {
        let parents = vec![vec![9.0, 9.0, 9.0]; 3];
        let mut children = vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]];
        let before = children.clone();
        // D = 3, rate 0.2
        let count = (0.2 * 3.0) as usize;
        assert_eq!(count, 0);
        cannibalize(&mut children, &parents, count);
        assert_eq!(children, before);
    }

    // ---- mutate ----

    #[test]
    fn test_mutate_leaves_children_untouched() {
        let children: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64, -(i as f64), 0.5]).collect();
        let snapshot: Vec<Vec<u64>> = children
            .iter()
            .map(|c| c.iter().map(|v| v.to_bits()).collect())
            .collect();

        let mutants = mutate(&children, 20, &mut rng());

        let after: Vec<Vec<u64>> = children
            .iter()
            .map(|c| c.iter().map(|v| v.to_bits()).collect())
            .collect();
        assert_eq!(snapshot, after);
        assert_eq!(mutants.len(), 20);
    }

    #[test]
    fn test_mutate_noise_within_unit() {
        let children = vec![vec![0.0; 3]];
        let mutants = mutate(&children, 50, &mut rng());
        for m in &mutants {
            assert_eq!(m.len(), 3);
            assert!(m.iter().all(|v| (-1.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_mutate_zero_count() {
        let children = vec![vec![1.0, 2.0]];
        assert!(mutate(&children, 0, &mut rng()).is_empty());
    }

    // ---- merge / normalize_size ----

    #[test]
    fn test_merge_order() {
        let merged = merge(vec![vec![1.0], vec![2.0]], vec![vec![3.0]]);
        assert_eq!(merged, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_normalize_truncates() {
        let mut pop = vec![vec![1.0], vec![2.0], vec![3.0]];
        normalize_size(&mut pop, 2, &[vec![9.0]]);
        assert_eq!(pop, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_normalize_pads_with_elites() {
        let mut pop = vec![vec![1.0]];
        normalize_size(&mut pop, 5, &[vec![8.0], vec![9.0]]);
        assert_eq!(
            pop,
            vec![vec![1.0], vec![8.0], vec![9.0], vec![8.0], vec![9.0]]
        );
    }
}
