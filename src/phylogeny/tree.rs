//! DescendantTree: repeated branching evolution from a seed
//!
//! The root is the seed. Every node above the requested depth spawns
//! `branching` children, each an independent evolution of its parent with
//! the full per-branch budget.

use crate::error::Result;
use crate::evolve::{Descendant, Evolver};
use crate::vocab::{Sentence, Vocabulary};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A node of the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Branch path from the root: `""`, `"0"`, `"0.1"` and so on
    pub label: String,
    pub depth: u32,
    /// Index of the parent node
    pub parent: Option<usize>,
    pub descendant: Descendant,
}

/// All descendants of one seed, parents before children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescendantTree {
    nodes: Vec<TreeNode>,
    depth: u32,
}

impl DescendantTree {
    /// Grow a tree `depth` levels deep. A stuck branch aborts the tree.
    pub fn grow<R: Rng + ?Sized>(
        evolver: &mut Evolver<'_>,
        seed: &Sentence,
        depth: u32,
        branching: u32,
        rng: &mut R,
    ) -> Result<Self> {
        let mut tree = Self {
            nodes: vec![TreeNode {
                label: String::new(),
                depth: 0,
                parent: None,
                descendant: Descendant::seed(seed.clone()),
            }],
            depth,
        };
        tree.grow_below(0, evolver, branching, rng)?;
        Ok(tree)
    }

    fn grow_below<R: Rng + ?Sized>(
        &mut self,
        parent: usize,
        evolver: &mut Evolver<'_>,
        branching: u32,
        rng: &mut R,
    ) -> Result<()> {
        let depth = self.nodes[parent].depth;
        if depth >= self.depth {
            return Ok(());
        }
        for branch in 0..branching {
            let descendant = evolver.evolve_branch(&self.nodes[parent].descendant, rng)?;
            let label = if self.nodes[parent].label.is_empty() {
                branch.to_string()
            } else {
                format!("{}.{}", self.nodes[parent].label, branch)
            };
            debug!(
                "Branch '{}' at depth {}: {}",
                label,
                depth + 1,
                descendant.render(evolver.vocab())
            );
            self.nodes.push(TreeNode {
                label,
                depth: depth + 1,
                parent: Some(parent),
                descendant,
            });
            let child = self.nodes.len() - 1;
            self.grow_below(child, evolver, branching, rng)?;
        }
        Ok(())
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes at the full depth (the root alone when depth is 0)
    pub fn leaves(&self) -> Vec<&TreeNode> {
        self.nodes.iter().filter(|n| n.depth == self.depth).collect()
    }

    /// One line per node: indented label and sentence
    pub fn render(&self, vocab: &Vocabulary) -> String {
        self.nodes
            .iter()
            .map(|n| {
                format!(
                    "{}[{}] {}",
                    "  ".repeat(n.depth as usize),
                    if n.label.is_empty() { "seed" } else { n.label.as_str() },
                    n.descendant.render(vocab)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvolutionConfig;
    use crate::error::ShotgunError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WORDS: &str = "SHOT SHOP STOP STEP SHIP HIP HOP TOP";

    fn config() -> EvolutionConfig {
        EvolutionConfig {
            edits_per_word: 1.0,
            max_edits_per_letter: 0.5,
        }
    }

    #[test]
    fn test_shape_and_labels() {
        let vocab = Vocabulary::parse(WORDS).unwrap();
        let seed = vocab.sentence(["SHOT", "HIP"]).unwrap();
        let mut evolver = Evolver::new(&vocab, config());
        let mut rng = StdRng::seed_from_u64(5);
        let tree = DescendantTree::grow(&mut evolver, &seed, 2, 3, &mut rng).unwrap();

        assert_eq!(tree.len(), 1 + 3 + 9);
        assert_eq!(tree.root().descendant.sentence, seed);
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 9);
        let labels: Vec<&str> = leaves.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels[0], "0.0");
        assert_eq!(labels[8], "2.2");

        for node in &tree.nodes()[1..] {
            let parent = &tree.nodes()[node.parent.unwrap()];
            assert_eq!(node.depth, parent.depth + 1);
            assert_eq!(node.descendant.lineage.generation, node.depth);
            assert_eq!(
                node.descendant.lineage.parent_hash.as_deref(),
                Some(parent.descendant.lineage.root_hash.as_str())
            );
            assert_eq!(node.descendant.lineage.edit_count(), 2);
        }
        assert!(tree.render(&vocab).starts_with("[seed] SHOT HIP"));
    }

    #[test]
    fn test_depth_zero_is_seed_only() {
        let vocab = Vocabulary::parse(WORDS).unwrap();
        let seed = vocab.sentence(["TOP"]).unwrap();
        let mut evolver = Evolver::new(&vocab, config());
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DescendantTree::grow(&mut evolver, &seed, 0, 2, &mut rng).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaves().len(), 1);
    }

    #[test]
    fn test_stuck_branch_aborts() {
        let vocab = Vocabulary::parse("CAT DOG").unwrap();
        let seed = vocab.sentence(["DOG"]).unwrap();
        let mut evolver = Evolver::new(&vocab, config());
        let mut rng = StdRng::seed_from_u64(0);
        let result = DescendantTree::grow(&mut evolver, &seed, 1, 2, &mut rng);
        assert!(matches!(result, Err(ShotgunError::Stuck { .. })));
    }
}
