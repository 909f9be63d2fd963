//! Union-find clustering of accepted pairs and representative selection.
//!
//! Pair scores are ignored here: clustering is transitive, so two documents
//! end up in one cluster whenever a chain of accepted pairs connects them.
//! Singleton groups are dropped, and every surviving cluster designates one
//! representative according to the requested policy.

use std::collections::{BTreeMap, HashMap};

use dp_core::{
    Cluster, ClusterDocument, DpError, Report, RepresentativePolicy, Result, SimilarityPair, Stats,
};
use dp_index::distance::{l2_squared, mean_vector};

/// Disjoint-set forest with union by rank and path compression.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => {
                self.parent[ra] = rb;
                rb
            }
            std::cmp::Ordering::Greater => {
                self.parent[rb] = ra;
                ra
            }
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
                ra
            }
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Group document ids connected by the given pairs.
///
/// Returns groups of size 2 or more, each with members in ascending order,
/// ordered among themselves by smallest member.
pub fn group_members(pairs: &[SimilarityPair], n_docs: usize) -> Result<Vec<Vec<usize>>> {
    let mut forest = UnionFind::new(n_docs);
    for pair in pairs {
        let (a, b) = pair.ids();
        if a >= n_docs || b >= n_docs {
            return Err(DpError::InvalidInput(format!(
                "pair ({a}, {b}) references a document outside the corpus of {n_docs}"
            )));
        }
        forest.union(a, b);
    }

    let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
    for id in 0..n_docs {
        by_root.entry(forest.find(id)).or_default().push(id);
    }

    // Ids were pushed in ascending order, so each group is already sorted.
    let mut groups: Vec<Vec<usize>> = by_root
        .into_values()
        .filter(|members| members.len() > 1)
        .collect();
    groups.sort_by_key(|members| members[0]);
    Ok(groups)
}

/// Pick the surviving member of one cluster.
///
/// Ties always resolve to the lowest id. The centroid policy requires
/// embeddings and fails rather than falling back to another policy.
pub fn select_representative(
    members: &[usize],
    texts: &[String],
    embeddings: Option<&[Vec<f32>]>,
    policy: RepresentativePolicy,
) -> Result<usize> {
    if members.is_empty() {
        return Err(DpError::InvalidInput(
            "cannot select a representative from an empty cluster".into(),
        ));
    }
    for &id in members {
        if id >= texts.len() {
            return Err(DpError::InvalidInput(format!(
                "cluster member {id} is outside the corpus of {}",
                texts.len()
            )));
        }
    }

    match policy {
        RepresentativePolicy::Shortest => {
            let mut best = members[0];
            let mut best_len = texts[best].chars().count();
            for &id in &members[1..] {
                let len = texts[id].chars().count();
                if len < best_len {
                    best = id;
                    best_len = len;
                }
            }
            Ok(best)
        }
        RepresentativePolicy::Longest => {
            let mut best = members[0];
            let mut best_len = texts[best].chars().count();
            for &id in &members[1..] {
                let len = texts[id].chars().count();
                if len > best_len {
                    best = id;
                    best_len = len;
                }
            }
            Ok(best)
        }
        RepresentativePolicy::Centroid => {
            let rows = embeddings.ok_or_else(|| {
                DpError::InvalidInput(
                    "centroid representative selection requires embeddings".into(),
                )
            })?;
            for &id in members {
                if id >= rows.len() {
                    return Err(DpError::InvalidInput(format!(
                        "no embedding for cluster member {id}"
                    )));
                }
            }
            let member_rows: Vec<&[f32]> = members.iter().map(|&id| rows[id].as_slice()).collect();
            let centroid = mean_vector(&member_rows);
            let mut best = members[0];
            let mut best_distance = l2_squared(&rows[best], &centroid);
            for &id in &members[1..] {
                let distance = l2_squared(&rows[id], &centroid);
                if distance < best_distance {
                    best = id;
                    best_distance = distance;
                }
            }
            Ok(best)
        }
    }
}

/// Fold accepted pairs into a full clustering report.
///
/// `duplicates` collects every non-representative cluster member; `kept`
/// collects representatives plus documents never clustered. Together they
/// cover each document id exactly once.
pub fn cluster(
    pairs: &[SimilarityPair],
    texts: &[String],
    embeddings: Option<&[Vec<f32>]>,
    policy: RepresentativePolicy,
) -> Result<Report> {
    let n_docs = texts.len();
    if let Some(rows) = embeddings {
        if rows.len() != n_docs {
            return Err(DpError::InvalidInput(format!(
                "got {} embeddings for {} documents",
                rows.len(),
                n_docs
            )));
        }
    }

    let groups = group_members(pairs, n_docs)?;
    let mut clusters: BTreeMap<usize, Cluster> = BTreeMap::new();
    let mut removed = vec![false; n_docs];
    for (key, members) in groups.into_iter().enumerate() {
        let representative = select_representative(&members, texts, embeddings, policy)?;
        let documents = members
            .iter()
            .map(|&id| ClusterDocument {
                id,
                text: texts[id].clone(),
                is_representative: id == representative,
            })
            .collect();
        for &id in &members {
            if id != representative {
                removed[id] = true;
            }
        }
        clusters.insert(
            key,
            Cluster {
                root: members[0],
                members,
                representative,
                documents,
            },
        );
    }

    let duplicates: Vec<usize> = (0..n_docs).filter(|&id| removed[id]).collect();
    let kept: Vec<usize> = (0..n_docs).filter(|&id| !removed[id]).collect();
    let stats = Stats::new(
        n_docs,
        clusters.len(),
        duplicates.len(),
        kept.len(),
        pairs.len(),
    );
    Ok(Report {
        clusters,
        stats,
        duplicates,
        kept,
    })
}
