//! Canned layouts shared by tests and benches.

use dockyard::{Alignment, Factory, NodeId, Orientation};

/// `RootDock -> ToolDock(Left) { Tool1, Tool2 }`.
#[derive(Debug, Clone, Copy)]
pub struct ToolLayout {
    pub root: NodeId,
    pub tools: NodeId,
    pub tool1: NodeId,
    pub tool2: NodeId,
}

pub fn tool_layout(factory: &mut Factory) -> ToolLayout {
    let root = factory.create_root_dock("Root");
    let tools = factory.create_tool_dock("Tools", Alignment::Left);
    let tool1 = factory.create_tool("Tool1", "Tool 1");
    let tool2 = factory.create_tool("Tool2", "Tool 2");
    factory.add_dockable(root, tools);
    factory.add_dockable(tools, tool1);
    factory.add_dockable(tools, tool2);
    factory.init_layout(root);
    ToolLayout {
        root,
        tools,
        tool1,
        tool2,
    }
}

/// A small IDE:
///
/// ```text
/// RootDock
/// └── Main (horizontal)
///     ├── Left tools { Explorer, Search }   0.25
///     ├── splitter
///     └── Documents { Readme, MainRs }      0.75
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdeLayout {
    pub root: NodeId,
    pub main: NodeId,
    pub left: NodeId,
    pub documents: NodeId,
    pub explorer: NodeId,
    pub search: NodeId,
    pub readme: NodeId,
    pub main_rs: NodeId,
}

pub fn ide_layout(factory: &mut Factory) -> IdeLayout {
    let root = factory.create_root_dock("Root");
    let main = factory.create_proportional_dock("Main", Orientation::Horizontal);
    let left = factory.create_tool_dock("LeftTools", Alignment::Left);
    let documents = factory.create_document_dock("Documents");
    let explorer = factory.create_tool("Explorer", "Explorer");
    let search = factory.create_tool("Search", "Search");
    let readme = factory.create_document("Readme", "README.md");
    let main_rs = factory.create_document("MainRs", "main.rs");

    factory.add_dockable(root, main);
    factory.add_dockable(main, left);
    let splitter = factory.create_splitter();
    factory.add_dockable(main, splitter);
    factory.add_dockable(main, documents);
    factory.add_dockable(left, explorer);
    factory.add_dockable(left, search);
    factory.add_dockable(documents, readme);
    factory.add_dockable(documents, main_rs);

    if let Some(d) = factory.dockable_mut(left) {
        d.set_proportion(0.25);
    }
    if let Some(d) = factory.dockable_mut(documents) {
        d.set_proportion(0.75);
    }
    factory.init_layout(root);

    IdeLayout {
        root,
        main,
        left,
        documents,
        explorer,
        search,
        readme,
        main_rs,
    }
}
