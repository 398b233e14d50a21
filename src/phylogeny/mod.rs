//! Phylogeny: descendant trees and the reads sampled from them

mod reads;
mod tree;

pub use reads::{Read, ReadSampler};
pub use tree::{DescendantTree, TreeNode};
