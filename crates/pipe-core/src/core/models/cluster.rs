/// A group of docking decoys produced by FCC clustering.
///
/// The first member is the cluster representative, the decoy whose structure stands in for
/// the whole cluster during filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Cluster number taken from the `Cluster <n> ->` label, if the line had one.
    pub label: Option<String>,
    /// Cluster-size marker written between the arrow and the member names, if present.
    pub size_marker: Option<usize>,
    /// Member decoy names, representative first.
    pub members: Vec<String>,
}

impl Cluster {
    pub fn new(label: Option<String>, size_marker: Option<usize>, members: Vec<String>) -> Self {
        Self {
            label,
            size_marker,
            members,
        }
    }

    /// The first member, or `None` for an empty cluster.
    pub fn representative(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }

    /// The tokens kept after the `Cluster` keyword and arrow are discarded, in line order.
    pub fn retained_tokens(&self) -> Vec<String> {
        self.label
            .iter()
            .cloned()
            .chain(self.size_marker.map(|size| size.to_string()))
            .chain(self.members.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn representative_is_first_member() {
        let cluster = Cluster::new(None, None, names(&["decoy_7", "decoy_9"]));
        assert_eq!(cluster.representative(), Some("decoy_7"));
    }

    #[test]
    fn empty_cluster_has_no_representative() {
        let cluster = Cluster::new(Some("1".into()), None, Vec::new());
        assert_eq!(cluster.representative(), None);
    }

    #[test]
    fn retained_tokens_keep_label_marker_and_members_in_order() {
        let cluster = Cluster::new(Some("3".into()), Some(14), names(&["decoy_7", "decoy_9"]));
        assert_eq!(
            cluster.retained_tokens(),
            names(&["3", "14", "decoy_7", "decoy_9"])
        );

        let bare = Cluster::new(None, None, names(&["decoy_1"]));
        assert_eq!(bare.retained_tokens(), names(&["decoy_1"]));
    }
}
