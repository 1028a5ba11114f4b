pub mod batch;
pub mod dna;
pub mod genotype;
