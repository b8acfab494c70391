//! distance engine : alignment of shared marker genes, pooling of identities, pairwise scheduling

pub mod aligner;
pub mod editscript;
pub mod identity;
pub mod pairdist;
pub mod scheduler;

pub use aligner::{EditDistanceAligner, GlobalAligner};
pub use editscript::{AlignCounts, EditOp, EditScript};
pub use identity::{gene_identity, GeneIdentity};
pub use pairdist::{assembly_distance, pooled_identity, PairDistance};
pub use scheduler::{compute_distances, DistanceTable};
