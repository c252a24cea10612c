// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `menu` command.

use navgate_core::{
    NavChild, NavGroup, NavItem, NavLink, NavTarget, PermissionCheck, VisibilityEngine,
};
use serde::Serialize;

use super::{load_config, open_session, print_json};
use crate::cli::{Cli, MenuArgs, OutputFormat};
use crate::error::CliResult;

/// One rendered menu line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MenuLine {
    depth: usize,
    kind: &'static str,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    visible: bool,
}

/// Executes the `menu` command.
pub fn menu(cli: &Cli, args: MenuArgs) -> CliResult<()> {
    let config = load_config(cli)?;
    let oracle = config.permission_oracle(open_session(cli, true)?);
    let engine = VisibilityEngine::new(&oracle);

    let lines = if args.all {
        flatten(&engine, &config.navigation)
    } else {
        flatten(&engine, &engine.visible_tree(&config.navigation))
    };

    match cli.format {
        OutputFormat::Text => {
            if lines.is_empty() {
                println!("(no visible entries)");
            }
            for line in &lines {
                let marker = match (args.all, line.visible) {
                    (false, _) => "",
                    (true, true) => "[x] ",
                    (true, false) => "[ ] ",
                };
                let indent = "  ".repeat(line.depth);
                match (line.kind, &line.target) {
                    ("heading", _) => println!("{marker}{indent}== {} ==", line.label),
                    ("group", _) => println!("{marker}{indent}+ {}", line.label),
                    (_, Some(target)) => println!("{marker}{indent}- {} -> {}", line.label, target),
                    (_, None) => println!("{marker}{indent}- {}", line.label),
                }
            }
        }
        OutputFormat::Json => {
            if args.all {
                print_json(&lines)?;
            } else {
                print_json(&engine.visible_tree(&config.navigation))?;
            }
        }
    }

    Ok(())
}

fn flatten<P: PermissionCheck + ?Sized>(
    engine: &VisibilityEngine<'_, P>,
    items: &[NavItem],
) -> Vec<MenuLine> {
    let mut lines = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match item {
            NavItem::Heading(h) => lines.push(MenuLine {
                depth: 0,
                kind: "heading",
                label: h.heading.clone(),
                target: None,
                visible: engine.heading_visible_at(index, items),
            }),
            NavItem::Link(link) => lines.push(link_line(engine, link, 0)),
            NavItem::Group(group) => group_lines(engine, group, 0, &mut lines),
        }
    }
    lines
}

fn group_lines<P: PermissionCheck + ?Sized>(
    engine: &VisibilityEngine<'_, P>,
    group: &NavGroup,
    depth: usize,
    lines: &mut Vec<MenuLine>,
) {
    lines.push(MenuLine {
        depth,
        kind: "group",
        label: group.title.clone(),
        target: None,
        visible: engine.group_visible(group),
    });
    for child in &group.children {
        match child {
            NavChild::Link(link) => lines.push(link_line(engine, link, depth + 1)),
            NavChild::Group(nested) => group_lines(engine, nested, depth + 1, lines),
        }
    }
}

fn link_line<P: PermissionCheck + ?Sized>(
    engine: &VisibilityEngine<'_, P>,
    link: &NavLink,
    depth: usize,
) -> MenuLine {
    let target = match &link.to {
        NavTarget::Named { name } => name.clone(),
        NavTarget::Path(path) => path.clone(),
    };
    MenuLine {
        depth,
        kind: "link",
        label: link.title.clone(),
        target: Some(target),
        visible: engine.link_visible(link),
    }
}

// =============================================================================
// Tests
// =============================================================================
