//! Listing output for `spec-reporter tree`.

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::summary::{NodeKind, SummaryNode};

/// Prints a summary forest, one node per line, suites highlighted.
pub fn print_tree(forest: &[SummaryNode], choice: ColorChoice) {
    let mut stdout = StandardStream::stdout(choice);
    for node in forest {
        print_node(&mut stdout, node, 0);
    }
}

fn print_node(stdout: &mut StandardStream, node: &SummaryNode, level: usize) {
    let pad = "  ".repeat(level);
    match node.kind {
        NodeKind::Suite => {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
            print!("{}{}", pad, node.name);
            let _ = stdout.reset();
            println!(" (suite, depth {})", node.depth);
        }
        NodeKind::Spec => println!("{}{}", pad, node.name),
    }
    for child in &node.children {
        print_node(stdout, child, level + 1);
    }
}
