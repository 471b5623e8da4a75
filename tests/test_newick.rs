use phylogroups::model::{PhyloTree, TreeBuilder};
use phylogroups::newick::{NewickParser, NewickStyle, parse_file, parse_str, subtree_to_newick, to_newick, write_newick};
use phylogroups::parser::{ByteParser, ParsingErrorType};
use std::io::Write;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0):0.5;";
    let tree = parse_str(newick).unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    let root_index = root.index();
    assert_eq!(*root.branch_length().unwrap(), 0.5);
    let root_children = root.children();
    assert_eq!(root_children.len(), 2);

    // - Internal vertex has children (A, B)
    let internal = tree.vertex(root_children[0]);
    assert!(internal.is_internal());
    assert_eq!(*internal.branch_length().unwrap(), 3.0);
    let leaf_a = tree.vertex(internal.children()[0]);
    let leaf_b = tree.vertex(internal.children()[1]);
    let leaf_c = tree.vertex(root_children[1]);
    assert_eq!(leaf_a.name(), "A");
    assert_eq!(leaf_b.name(), "B");
    assert_eq!(leaf_c.name(), "C");
    assert!(leaf_a.is_leaf() && leaf_b.is_leaf() && leaf_c.is_leaf());

    // - Parent relationships
    assert_eq!(internal.parent(), Some(root_index));
    assert_eq!(leaf_a.parent(), Some(internal.index()));
    assert_eq!(leaf_c.parent(), Some(root_index));
    assert_eq!(tree.distance_to_parent(leaf_b.index()), 2.0);
}

#[test]
fn test_multifurcating_tree() {
    let tree = parse_str("(A:1,B:1,C:1,(D:1,E:1,F:1):2);").unwrap();

    assert_eq!(tree.num_leaves(), 6);
    assert_eq!(tree.num_vertices(), 8);
    assert_eq!(tree.root().children().len(), 4);
    let last = tree.vertex(tree.root().children()[3]);
    assert_eq!(last.children().len(), 3);
}

#[test]
fn test_internal_names() {
    let tree = parse_str("((A:1,B:1)Anatidae:2,C:3)Anseriformes;").unwrap();

    assert_eq!(tree.root().name(), "Anseriformes");
    assert!(!tree.root().has_branch_length());
    let internal = tree.vertex(tree.root().children()[0]);
    assert_eq!(internal.name(), "Anatidae");
    assert_eq!(internal.distance_to_parent(), 2.0);
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5)'Inner one':3.0,'3rd Taxon':4.0):0.0;";
    let tree = parse_str(newick).unwrap();

    let names: Vec<_> = tree.pre_order_iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["", "Inner one", "Taxon one", "Second's taxon", "3rd Taxon"]);
}

#[test]
fn test_tree_with_scientific_notation() {
    let tree = parse_str("((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10):0.0;").unwrap();

    let internal = tree.vertex(tree.root().children()[0]);
    assert_eq!(internal.distance_to_parent(), 100.0);
    let leaf_b = tree.vertex(internal.children()[1]);
    assert_eq!(leaf_b.distance_to_parent(), 2500.0);
}

#[test]
fn test_optional_branch_length() {
    let tree = parse_str("((A:1.0,B),C:4.0);").unwrap();

    let internal = tree.vertex(tree.root().children()[0]);
    assert!(!internal.has_branch_length());
    assert_eq!(internal.distance_to_parent(), 0.0);
    assert!(!tree.vertices_have_branch_lengths());
}

#[test]
fn test_empty_names() {
    let tree = parse_str("(,(,):1);").unwrap();

    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.vertices().iter().all(|v| !v.has_name()));
}

#[test]
fn test_single_leaf_tree() {
    let tree = parse_str("Kakapo;").unwrap();

    assert_eq!(tree.num_vertices(), 1);
    assert!(tree.root().is_leaf());
    assert!(tree.root().is_root());
    assert_eq!(tree.root().name(), "Kakapo");
    assert!(tree.is_valid());
}

#[test]
fn test_newick_with_comment_1() {
    let newick = "[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2):0.0;";
    let tree = parse_str(newick);

    if tree.is_err() {
        eprintln!("Error parsing tree with comments: {:?}", tree.as_ref().err());
    }

    let tree = tree.unwrap();
    assert_eq!(tree.num_leaves(), 3);
    let leaf_c = tree.vertex(tree.root().children()[1]);
    assert_eq!(leaf_c.name(), "C");
    assert_eq!(leaf_c.distance_to_parent(), 2.2);
}

#[test]
fn test_newick_with_comment_2() {
    let newick = "[A tree of] ([Shags!] C:[King Commentoran] 2.2, (A[Great Commentoran]:0.33, B[Pied Commentoran]:0.33):1.87):0.0[The end.];";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.vertex(tree.root().children()[0]).name(), "C");
}

#[test]
fn test_nhx_annotations_are_skipped() {
    let tree = parse_str("((A:1[&&NHX:S=kea],B:1)[&&NHX:D=N]:2,C:3);").unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.vertex(tree.root().children()[0]).distance_to_parent(), 2.0);
}

#[test]
fn test_deep_caterpillar_tree() {
    // Nesting this deep would exhaust the call stack of a recursive parser
    let depth = 50_000;
    let mut newick = "(".repeat(depth);
    newick.push_str("L0");
    for i in 1..=depth {
        newick.push_str(&format!(",L{}):1", i));
    }
    newick.push(';');

    let tree = parse_str(&newick).unwrap();
    assert_eq!(tree.num_leaves(), depth + 1);
    assert_eq!(tree.num_vertices(), 2 * depth + 1);

    let written = to_newick(&tree, NewickStyle::AllNames);
    assert_eq!(written, newick);
}

#[test]
fn test_parser_reuse_for_consecutive_trees() {
    let mut parser = ByteParser::for_str("(A,B);\n(C,D,E);");
    let mut newick_parser = NewickParser::new_defaults();

    let first = newick_parser.parse_str(&mut parser).unwrap();
    let second = newick_parser.parse_str(&mut parser).unwrap();

    assert_eq!(first.num_leaves(), 2);
    assert_eq!(second.num_leaves(), 3);
}

/// Counts builder calls instead of building a tree.
#[derive(Default)]
struct CountingBuilder {
    trees: usize,
    leaves: usize,
    internals: usize,
    named: Vec<String>,
    hints: Vec<usize>,
}

impl TreeBuilder for CountingBuilder {
    type VertexIdx = ();
    type Tree = usize;

    fn init_next(&mut self, num_vertices: usize) {
        self.hints.push(num_vertices);
    }

    fn add_leaf(&mut self, name: String, _branch_len: Option<f64>) {
        self.leaves += 1;
        self.named.push(name);
    }

    fn add_internal(&mut self, children: Vec<()>, name: String, _branch_len: Option<f64>) {
        assert!(!children.is_empty());
        self.internals += 1;
        self.named.push(name);
    }

    fn add_root(&mut self, _children: Vec<()>, name: String, _branch_len: Option<f64>) {
        self.named.push(name);
    }

    fn finish_tree(&mut self) -> Option<usize> {
        self.trees += 1;
        Some(self.leaves)
    }
}

#[test]
fn test_parser_with_custom_builder() {
    let mut parser = ByteParser::for_str("((A,B)AB,C)R;\n(D,E,F,G);");
    let mut newick_parser = NewickParser::new(CountingBuilder::default());

    assert_eq!(newick_parser.parse_str(&mut parser).unwrap(), 3);
    assert_eq!(newick_parser.parse_str(&mut parser).unwrap(), 7);

    let builder = newick_parser.into_builder();
    assert_eq!(builder.trees, 2);
    assert_eq!(builder.internals, 1);
    assert_eq!(builder.named, vec!["A", "B", "AB", "C", "R", "D", "E", "F", "G", ""]);
    // The second tree is pre-sized with the vertex count of the first
    assert_eq!(builder.hints[1], 5);
}

// --- TESTS PARSING ERRORS ---
fn parse_error_kind(newick: &str) -> ParsingErrorType {
    parse_str(newick).unwrap_err().kind().clone()
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_error_kind(""), ParsingErrorType::EmptyInput);
    assert_eq!(parse_error_kind("  \n [just a comment] "), ParsingErrorType::EmptyInput);
}

#[test]
fn test_missing_semicolon() {
    assert!(matches!(parse_error_kind("(A,B)"), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_unbalanced_parentheses() {
    assert!(matches!(parse_error_kind("((A,B);"), ParsingErrorType::InvalidNewickString(_)));
    assert_eq!(parse_error_kind("((A,B)"), ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_invalid_branch_lengths() {
    assert!(matches!(parse_error_kind("(A:-1,B:1);"), ParsingErrorType::InvalidBranchLength(_)));
    assert!(matches!(parse_error_kind("(A:x,B:1);"), ParsingErrorType::InvalidBranchLength(_)));
    assert!(matches!(parse_error_kind("(A:1e999,B:1);"), ParsingErrorType::InvalidBranchLength(_)));
}

#[test]
fn test_trailing_content() {
    assert_eq!(parse_error_kind("(A,B);(C,D);"), ParsingErrorType::TrailingContent);
    assert!(parse_str("(A,B); [trailing comment]\n").is_ok());
}

#[test]
fn test_invalid_utf8_label() {
    let byte_parser = ByteParser::from_vec(b"(Kea:1,K\xE4k\xE4:1);".to_vec());
    let err = NewickParser::new_defaults().parse_single(byte_parser).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidUtf8);
    assert_eq!(err.position(), 7);
}

#[test]
fn test_unclosed_comment_in_tree() {
    assert_eq!(parse_error_kind("(A[oops,B);"), ParsingErrorType::UnclosedComment);
}

#[test]
fn test_error_reports_position_and_context() {
    let err = parse_str("(A,B)x:1 C;").unwrap_err();
    let message = err.to_string();
    assert!(err.position() > 0);
    assert!(message.contains("Expected ';'"));
    assert!(message.contains("Context"));
}

// --- TESTS NEWICK WRITING ---
#[test]
fn test_write_round_trip() {
    let newick = "((A:1,B:2)AB:3,C:4)R;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree, NewickStyle::AllNames), newick);
    assert_eq!(tree.to_newick(NewickStyle::LeafNames), "((A:1,B:2):3,C:4);");
}

#[test]
fn test_write_root_branch_length() {
    let tree = parse_str("(A:1,B:2):0.5;").unwrap();
    assert_eq!(to_newick(&tree, NewickStyle::AllNames), "(A:1,B:2):0.5;");
}

#[test]
fn test_write_quotes_labels_when_needed() {
    let tree = parse_str("('Taxon one':1,'Baillon''s':2,Plain_name:3);").unwrap();
    let written = to_newick(&tree, NewickStyle::AllNames);
    assert_eq!(written, "('Taxon one':1,'Baillon''s':2,Plain_name:3);");

    let reparsed = parse_str(&written).unwrap();
    let names: Vec<_> = reparsed.pre_order_iter().map(|v| v.name().to_string()).collect();
    assert_eq!(names, vec!["", "Taxon one", "Baillon's", "Plain_name"]);
}

#[test]
fn test_subtree_to_newick() {
    let tree = parse_str("((A:1,B:2)AB:3,C:4)R;").unwrap();
    let ab = tree.root().children()[0];
    assert_eq!(subtree_to_newick(&tree, ab, NewickStyle::AllNames), "(A:1,B:2)AB;");

    let c = tree.root().children()[1];
    assert_eq!(subtree_to_newick(&tree, c, NewickStyle::AllNames), "C;");
}

#[test]
fn test_write_unrooted_tree_is_empty() {
    assert_eq!(to_newick(&PhyloTree::new(), NewickStyle::AllNames), "");
}

#[test]
fn test_write_newick_adds_newline() {
    let tree = parse_str("(A:1,B:1);").unwrap();
    let mut buffer = Vec::new();
    write_newick(&mut buffer, &tree, NewickStyle::AllNames).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "(A:1,B:1);\n");
}

// --- TESTS FILE PARSING ---
#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[saved by hand]\n((Kea:1,Kaka:1):2,Kakapo:3);").unwrap();

    let tree = parse_file(file.path()).unwrap();
    assert_eq!(tree.num_leaves(), 3);
}

#[test]
fn test_parse_missing_file() {
    let err = parse_file("does/not/exist.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
