use core::fmt;

use crate::ConfigNode;

// Tree rendering, one tab per nesting level:
//
// NAME
// {
//     key = value
//     CHILD
//     {
//     }
// }
fn write_node(node: &ConfigNode, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;
    writeln!(f, "{}", node.name())?;
    write_indent(f, depth)?;
    writeln!(f, "{{")?;

    for value in node.values() {
        write_indent(f, depth + 1)?;
        writeln!(f, "{} = {}", value.name(), value.value())?;
    }
    for child in node.nodes() {
        write_node(child, f, depth + 1)?;
    }

    write_indent(f, depth)?;
    writeln!(f, "}}")
}

#[inline]
fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("\t")?;
    }
    Ok(())
}

impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self, f, 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::ConfigNode;
    use alloc::string::ToString;

    #[test]
    fn renders_nested_tree() {
        let mut root = ConfigNode::new("PART");
        root.add_value("name", "tank");
        root.add_node(ConfigNode::new("RESOURCE")).add_value("amount", "90");

        let text = root.to_string();
        assert_eq!(
            text,
            "PART\n{\n\tname = tank\n\tRESOURCE\n\t{\n\t\tamount = 90\n\t}\n}\n"
        );
    }
}
