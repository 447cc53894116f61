use crate::filesystem::{FilesystemNode, SnapshotError, VirtualFileTree};

pub const WELCOME_TEXT: &str =
    "Welcome to the terminal!\nType \"help\" to see available commands.";

pub const EXAMPLE_MARKDOWN: &str = "# Markdown Example\n\nThis is an example markdown file.\n\n## Features\n\n- **Bold text**\n- *Italic text*\n- `Code snippets`\n\n### Lists\n\n1. First item\n2. Second item\n3. Third item\n\n```\ncode block\n```\n\n> Blockquote example\n\n[Link example](https://example.com)";

pub const HOSTS: &str = "127.0.0.1 localhost\n142.250.190.78 google.com\n140.82.121.3 github.com";

pub fn passwd(user: &str) -> String {
    format!(
        "root:x:0:0:root:/root:/bin/bash\n{user}:x:1000:1000:Current User:/home/{user}:/bin/bash"
    )
}

/// The tree a fresh session starts with.
pub fn default_tree(user: &str) -> Result<VirtualFileTree, SnapshotError> {
    let home = FilesystemNode::directory([
        ("welcome.txt", FilesystemNode::file(WELCOME_TEXT)),
        ("example.md", FilesystemNode::file(EXAMPLE_MARKDOWN)),
    ]);

    let root = FilesystemNode::directory([
        (
            "home",
            FilesystemNode::directory([(user.to_string(), home)]),
        ),
        ("bin", FilesystemNode::empty_directory()),
        (
            "etc",
            FilesystemNode::directory([
                ("passwd", FilesystemNode::file(passwd(user))),
                ("hosts", FilesystemNode::file(HOSTS)),
            ]),
        ),
        ("tmp", FilesystemNode::empty_directory()),
    ]);

    VirtualFileTree::try_from(root)
}
