use phylogroups::cluster::{
    MembershipOptions, member_names, membership_to_string, owned_region, write_membership,
};
use phylogroups::{cluster_tree, parse_newick_str};

const NESTED: &str = "(((A:1,B:1):5,C:1):5,((D:1,E:1):5,F:1):5);";

#[test]
fn test_owned_region_is_pre_order_and_stops_at_boundaries() {
    let tree = parse_newick_str("((A:1,B:1)AB:3,(C:1,D:1)CD:1)R;").unwrap();
    let clusters = cluster_tree(&tree, 2.0).unwrap();

    let root_region: Vec<_> = owned_region(&clusters, 0)
        .into_iter()
        .map(|v| tree[v].name())
        .collect();
    assert_eq!(root_region, vec!["R", "CD", "C", "D"]);

    let child_region: Vec<_> = clusters
        .owned_region(1)
        .into_iter()
        .map(|v| tree[v].name())
        .collect();
    assert_eq!(child_region, vec!["AB", "A", "B"]);
}

#[test]
fn test_member_names_include_named_internal_vertices() {
    let tree = parse_newick_str("((A:1,B:1)AB:3,C:1)R;").unwrap();
    let clusters = cluster_tree(&tree, 2.0).unwrap();

    assert_eq!(member_names(&clusters, 0), vec!["R", "C"]);
    assert_eq!(member_names(&clusters, 1), vec!["AB", "A", "B"]);
}

#[test]
fn test_member_names_keep_duplicates() {
    let tree = parse_newick_str("((Kea:1,Kea:1):3,Kea:1);").unwrap();
    let clusters = cluster_tree(&tree, 2.0).unwrap();

    assert_eq!(member_names(&clusters, 0), vec!["Kea"]);
    assert_eq!(member_names(&clusters, 1), vec!["Kea", "Kea"]);
}

#[test]
fn test_membership_listing() {
    let tree = parse_newick_str(NESTED).unwrap();
    let clusters = cluster_tree(&tree, 2.0).unwrap();

    let listing = membership_to_string(&clusters, MembershipOptions::default());
    assert_eq!(
        listing,
        ">Cluster_0\n>Cluster_1\nC\n>Cluster_3\nA\nB\n>Cluster_2\nF\n>Cluster_4\nD\nE\n"
    );
}

#[test]
fn test_membership_listing_with_subtrees() {
    let tree = parse_newick_str(NESTED).unwrap();
    let clusters = cluster_tree(&tree, 2.0).unwrap();

    let options = MembershipOptions { with_subtrees: true };
    let listing = membership_to_string(&clusters, options);
    let expected = "\
>Cluster_0
@(((A:1,B:1):5,C:1):5,((D:1,E:1):5,F:1):5);
>Cluster_1
@((A:1,B:1):5,C:1);
C
>Cluster_3
@(A:1,B:1);
A
B
>Cluster_2
@((D:1,E:1):5,F:1);
F
>Cluster_4
@(D:1,E:1);
D
E
";
    assert_eq!(listing, expected);
}

#[test]
fn test_single_cluster_lists_every_name() {
    let tree = parse_newick_str("((A:1,B:1)AB:1,C:1);").unwrap();
    let clusters = cluster_tree(&tree, 10.0).unwrap();

    let listing = membership_to_string(&clusters, MembershipOptions::default());
    assert_eq!(listing, ">Cluster_0\nAB\nA\nB\nC\n");
}

#[test]
fn test_write_membership_to_writer() {
    let tree = parse_newick_str("((A:1,B:1):3,C:1);").unwrap();
    let clusters = cluster_tree(&tree, 2.0).unwrap();

    let mut buffer = Vec::new();
    write_membership(&mut buffer, &clusters, MembershipOptions::default()).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), ">Cluster_0\nC\n>Cluster_1\nA\nB\n");
}

#[test]
fn test_every_name_listed_exactly_once() {
    let tree = parse_newick_str("(((A:1,B:2):3,(C:0.5,D:4)CD:1):2,(E:3,(F:1,G:1):2.5):0.1)R;").unwrap();
    for cutoff in [0.0, 0.9, 1.5, 2.2, 3.5, 5.0] {
        let clusters = cluster_tree(&tree, cutoff).unwrap();
        let mut listed: Vec<&str> = (0..clusters.len())
            .flat_map(|c| member_names(&clusters, c))
            .collect();
        listed.sort_unstable();
        assert_eq!(listed, vec!["A", "B", "C", "CD", "D", "E", "F", "G", "R"]);
    }
}
