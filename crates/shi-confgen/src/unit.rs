//! Output file assembly.

use crate::emit::ClassBlock;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Notice placed at the top of every generated file.
pub const DEFAULT_COPYRIGHT: &[&str] = &[
    "Copyright (c) 2020 Karsten Becker All rights reserved.",
    "Use of this source code is governed by a BSD-style",
    "license that can be found in the LICENSE file.",
];

/// The generated text for one header: a banner followed by one block per
/// configuration class, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub blocks: Vec<ClassBlock>,
}

impl GeneratedUnit {
    pub fn new(blocks: Vec<ClassBlock>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Helper names defined by more than one block.
    ///
    /// Helpers are named after fields, so two classes with a sequence field
    /// of the same name produce conflicting definitions in one file.
    pub fn helper_collisions(&self) -> Vec<String> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut collisions = Vec::new();
        for block in &self.blocks {
            for name in &block.helper_names {
                let count = seen.entry(name.as_str()).or_default();
                *count += 1;
                if *count == 2 {
                    collisions.push(name.clone());
                }
            }
        }
        collisions
    }

    /// Render the complete file.
    pub fn render(&self, copyright: &[String], date: NaiveDate) -> String {
        let mut code = banner(copyright, date);
        for block in &self.blocks {
            code.push('\n');
            code.push_str(&block.text);
        }
        code
    }
}

fn banner(copyright: &[String], date: NaiveDate) -> String {
    let mut code = String::new();

    if !copyright.is_empty() {
        code.push_str("/*\n");
        for line in copyright {
            if line.is_empty() {
                code.push_str(" *\n");
            } else {
                code.push_str(&format!(" * {line}\n"));
            }
        }
        code.push_str(" */\n\n");
    }

    code.push_str("// WARNING, this is an automatically generated file!\n");
    code.push_str("// Don't change anything in here.\n");
    code.push_str(&format!("// Last update {}\n", date.format("%Y-%m-%d")));
    code.push('\n');
    code.push_str("# include <iostream>\n");
    code.push_str("# include <string>\n");
    code
}
