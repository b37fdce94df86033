use crate::error::AppError;
use ndarray::ArrayView1;
use rayon::prelude::*;
use serde::Deserialize;

const LEAF: i64 = -1;

/// A fitted multi-class classifier operating on already-scaled rows.
pub trait Classifier: Send + Sync {
    /// Width of the rows the classifier was fitted on.
    fn n_features(&self) -> usize;

    /// Encoded class ids, in the column order of `predict_proba`.
    fn classes(&self) -> &[i64];

    fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Result<Vec<f64>, AppError>;

    /// Encoded class with the highest probability (first one on ties) and the
    /// full distribution.
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<(i64, Vec<f64>), AppError> {
        let probabilities = self.predict_proba(row)?;
        let best = argmax(&probabilities).ok_or("classifier returned no probabilities")?;
        let class = *self
            .classes()
            .get(best)
            .ok_or_else(|| format!("no class at probability column {}", best))?;
        Ok((class, probabilities))
    }
}

pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// One fitted decision tree in parallel-array layout: node `i` splits on
/// `feature[i]` and goes left when `x <= threshold[i]`; leaves have
/// `children_left[i] == -1` and carry per-class weights in `value[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n_nodes = self.children_left.len();
        if n_nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n_nodes
            || self.feature.len() != n_nodes
            || self.threshold.len() != n_nodes
            || self.value.len() != n_nodes
        {
            return Err(format!("tree arrays disagree on node count {}", n_nodes));
        }

        for node in 0..n_nodes {
            let left = self.children_left[node];
            if left == LEAF {
                if self.value[node].len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class weights, expected {}",
                        node,
                        self.value[node].len(),
                        n_classes
                    ));
                }
                if let Some(weight) = self.value[node].iter().find(|w| !w.is_finite() || **w < 0.0) {
                    return Err(format!("leaf {} has invalid class weight {}", node, weight));
                }
                continue;
            }
            let right = self.children_right[node];
            // Children always come after their parent, so walks terminate.
            for child in [left, right] {
                if child <= node as i64 || child >= n_nodes as i64 {
                    return Err(format!("node {} has out-of-range child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
        }
        Ok(())
    }

    fn leaf_for(&self, row: ArrayView1<'_, f64>) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let x = row[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Leaf class weights normalized to a distribution.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Vec<f64> {
        let weights = &self.value[self.leaf_for(row)];
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / weights.len() as f64; weights.len()]
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawForest")]
pub struct RandomForest {
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

#[derive(Deserialize)]
struct RawForest {
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

impl TryFrom<RawForest> for RandomForest {
    type Error = String;

    fn try_from(raw: RawForest) -> Result<Self, Self::Error> {
        RandomForest::new(raw.n_features, raw.classes, raw.trees)
    }
}

impl RandomForest {
    pub fn new(n_features: usize, classes: Vec<i64>, trees: Vec<DecisionTree>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        if trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (idx, tree) in trees.iter().enumerate() {
            tree.validate(n_features, classes.len())
                .map_err(|e| format!("tree {}: {}", idx, e))?;
        }
        Ok(Self {
            n_features,
            classes,
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Result<Vec<f64>, AppError> {
        if row.len() != self.n_features {
            return Err(AppError::prediction(format!(
                "X has {} features, but the classifier is expecting {} features as input",
                row.len(),
                self.n_features
            )));
        }

        // Collect per tree and sum in tree order so results are reproducible.
        let per_tree: Vec<Vec<f64>> = self
            .trees
            .par_iter()
            .map(|tree| tree.predict_proba(row))
            .collect();

        let mut sum = vec![0.0; self.classes.len()];
        for proba in &per_tree {
            for (acc, p) in sum.iter_mut().zip(proba) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        Ok(sum.into_iter().map(|s| s / n).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    fn stump(feature: i64, threshold: f64, left: Vec<f64>, right: Vec<f64>) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![vec![0.0, 0.0], left, right],
        }
    }

    #[test]
    fn split_goes_left_on_equal_threshold() {
        let tree = stump(0, 1.0, vec![3.0, 1.0], vec![0.0, 4.0]);
        assert_eq!(tree.predict_proba(arr1(&[1.0]).view()), vec![0.75, 0.25]);
        assert_eq!(tree.predict_proba(arr1(&[1.5]).view()), vec![0.0, 1.0]);
    }

    #[test]
    fn forest_averages_tree_distributions() {
        let forest = RandomForest::new(
            2,
            vec![0, 1],
            vec![
                stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0]),
                stump(1, 0.0, vec![0.5, 0.5], vec![1.0, 0.0]),
            ],
        )
        .unwrap();

        let proba = forest.predict_proba(arr1(&[1.0, -1.0]).view()).unwrap();
        assert_abs_diff_eq!(proba[0], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(proba[1], 0.75, epsilon = 1e-12);

        let (class, _) = forest.predict(arr1(&[1.0, -1.0]).view()).unwrap();
        assert_eq!(class, 1);
    }

    #[test]
    fn wrong_width_is_a_prediction_error() {
        let forest = RandomForest::new(2, vec![0, 1], vec![stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0])]).unwrap();
        let err = forest.predict_proba(arr1(&[1.0]).view()).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Prediction);
    }

    #[test]
    fn rejects_cyclic_or_dangling_children() {
        let mut tree = stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0]);
        tree.children_left[0] = 0;
        assert!(RandomForest::new(1, vec![0, 1], vec![tree]).is_err());

        let mut tree = stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0]);
        tree.children_right[0] = 7;
        assert!(RandomForest::new(1, vec![0, 1], vec![tree]).is_err());
    }

    #[test]
    fn rejects_leaf_width_mismatch() {
        let tree = stump(0, 0.0, vec![1.0, 0.0, 0.0], vec![0.0, 1.0]);
        let err = RandomForest::new(1, vec![0, 1], vec![tree]).unwrap_err();
        assert!(err.contains("class weights"));
    }

    #[test]
    fn rejects_negative_or_non_finite_leaf_weights() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let tree = stump(0, 0.0, vec![1.0, bad], vec![0.0, 1.0]);
            let err = RandomForest::new(1, vec![0, 1], vec![tree]).unwrap_err();
            assert!(err.contains("tree 0: leaf 1 has invalid class weight"), "{}", err);
        }
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), Some(0));
        assert_eq!(argmax(&[0.1, 0.2, 0.7]), Some(2));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn deserializes_and_validates_from_json() {
        let json = r#"{
            "n_features": 1,
            "classes": [0, 1],
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[5, 5], [5, 0], [0, 5]]
            }]
        }"#;
        let forest: RandomForest = serde_json::from_str(json).unwrap();
        assert_eq!(forest.n_trees(), 1);

        let bad = json.replace("\"classes\": [0, 1]", "\"classes\": []");
        assert!(serde_json::from_str::<RandomForest>(&bad).is_err());
    }
}
