use citegraph_core::directory::replay::{Profile, ReplayDirectory};
use citegraph_core::{build_network, to_graph, Author, AuthorId, TraversalConfig};
use proptest::prelude::*;
use std::collections::HashSet;

/// Random directed coauthor relation over up to 8 authors, possibly cyclic
fn relation() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..8).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0..n, 0..6), n))
}

fn directory(adjacency: &[Vec<usize>]) -> ReplayDirectory {
    let profiles = adjacency
        .iter()
        .enumerate()
        .map(|(i, links)| {
            links.iter().fold(
                Profile::new(format!("Author {}", i), format!("ID{}", i)),
                |profile, &j| profile.with_coauthor(format!("Author {}", j), format!("ID{}", j)),
            )
        })
        .collect();
    ReplayDirectory::from_profiles(profiles)
}

fn visited_ids(adjacency: &[Vec<usize>], config: TraversalConfig) -> HashSet<AuthorId> {
    build_network(&directory(adjacency), "Author 0", &config)
        .unwrap()
        .authors()
        .ids()
        .cloned()
        .collect()
}

proptest! {
    #[test]
    fn equality_is_identity_only(id in "[A-Za-z0-9]{1,12}", n1 in ".{0,20}", n2 in ".{0,20}") {
        prop_assert_eq!(Author::new(n1, id.as_str()), Author::new(n2, id.as_str()));
    }

    #[test]
    fn depth_zero_is_root_only(adjacency in relation(), breadth in 0usize..4) {
        let network = build_network(
            &directory(&adjacency),
            "Author 0",
            &TraversalConfig::new(0, breadth),
        ).unwrap();

        prop_assert_eq!(network.len(), 1);
        prop_assert_eq!(network.root().coauthor_count(), 0);
    }

    #[test]
    fn visited_grows_with_depth(adjacency in relation(), depth in 1usize..6, breadth in 0usize..4) {
        let shallow = visited_ids(&adjacency, TraversalConfig::new(depth - 1, breadth));
        let deep = visited_ids(&adjacency, TraversalConfig::new(depth, breadth));

        prop_assert!(shallow.is_subset(&deep));
    }

    #[test]
    fn terminates_within_bounds(adjacency in relation(), depth in 0usize..1000, breadth in 0usize..4) {
        let network = build_network(
            &directory(&adjacency),
            "Author 0",
            &TraversalConfig::new(depth, breadth),
        ).unwrap();

        prop_assert!(network.rounds <= depth);
        prop_assert!(network.rounds <= adjacency.len());
        prop_assert!(network.len() <= adjacency.len());
    }

    #[test]
    fn breadth_caps_fan_out(adjacency in relation(), breadth in 1usize..4) {
        let network = build_network(
            &directory(&adjacency),
            "Author 0",
            &TraversalConfig::new(5, breadth),
        ).unwrap();

        prop_assert!(network.authors().iter().all(|a| a.coauthor_count() <= breadth));
    }

    #[test]
    fn export_matches_network(adjacency in relation(), depth in 0usize..5, breadth in 0usize..4) {
        let network = build_network(
            &directory(&adjacency),
            "Author 0",
            &TraversalConfig::new(depth, breadth),
        ).unwrap();
        let graph = to_graph(&network);

        let links: usize = network.authors().iter().map(|a| a.coauthor_count()).sum();
        let distinct: HashSet<_> = graph.nodes().map(|n| n.id.clone()).collect();

        prop_assert_eq!(graph.node_count(), network.len());
        prop_assert_eq!(distinct.len(), network.len());
        prop_assert_eq!(graph.edge_count(), links);
        prop_assert_eq!(graph.nodes().filter(|n| n.is_root).count(), 1);
    }
}
