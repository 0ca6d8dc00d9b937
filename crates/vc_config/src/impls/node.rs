use vc_node::ConfigNode;

use crate::info::{NodeInfo, NonGenericTypeInfoCell, TypeInfo, Typed};

impl Typed for ConfigNode {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Node(NodeInfo::raw::<ConfigNode>()))
    }
}
