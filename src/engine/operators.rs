use super::encoding::Genotype;
use rand::Rng;

/// Tournament selection: pick best of K random candidates (lowest fitness)
pub fn tournament_selection<R: Rng>(
    population: &[(Genotype, f64)],
    tournament_size: usize,
    rng: &mut R,
) -> Genotype {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = population[best_idx].1;

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].1 < best_fitness {
            best_idx = idx;
            best_fitness = population[idx].1;
        }
    }

    population[best_idx].0.clone()
}

/// Two-point crossover: swap the slot range between two cut points
pub fn crossover<R: Rng>(
    parent1: &Genotype,
    parent2: &Genotype,
    rng: &mut R,
) -> (Genotype, Genotype) {
    let len = parent1.len().min(parent2.len());
    if len <= 2 {
        return (parent1.clone(), parent2.clone());
    }

    let start = rng.gen_range(1..len - 1);
    let end = rng.gen_range(start + 1..len);

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[start..end].copy_from_slice(&parent2[start..end]);
    child2[start..end].copy_from_slice(&parent1[start..end]);

    (child1, child2)
}

/// Mutation: perturb slots by a bounded delta, re-clipped to the domain
pub fn mutate<R: Rng>(
    genotype: &mut Genotype,
    mutation_rate: f64,
    mutation_step: f64,
    rng: &mut R,
) {
    for gene in genotype.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            let delta = rng.gen_range(-mutation_step..=mutation_step);
            *gene = (*gene + delta).clamp(-1.0, 1.0);
        }
    }
}

/// Generate a random genotype, each slot uniform over the decision domain
pub fn random_genotype<R: Rng>(length: usize, rng: &mut R) -> Genotype {
    (0..length).map(|_| rng.gen_range(-1.0..=1.0)).collect()
}
