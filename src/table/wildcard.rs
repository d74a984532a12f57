// SFCScript - SNES address conversion and table-driven script extraction
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Ranged table definitions.
//!
//! A code containing `**` stands for 256 definitions, one per byte value.
//! If it also contains `%%`, each of those expands again, giving 65,536.
//! The same tokens in the literal receive the same substitution.

/// Outer placeholder token.
pub const OUTER: &str = "**";

/// Inner placeholder token. Only honored together with [`OUTER`].
pub const INNER: &str = "%%";

/// Iterator over the definitions produced by one source line, in
/// ascending (outer, inner) order.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    code: &'a str,
    literal: &'a str,
    outer: bool,
    inner: bool,
    next: u32,
    end: u32,
}

/// Expand a `code=literal` pair.
pub fn expand<'a>(code: &'a str, literal: &'a str) -> Expansion<'a> {
    let outer = code.contains(OUTER);
    let inner = outer && code.contains(INNER);
    let end = match (outer, inner) {
        (false, _) => 1,
        (true, false) => 0x100,
        (true, true) => 0x1_0000,
    };

    Expansion {
        code,
        literal,
        outer,
        inner,
        next: 0,
        end,
    }
}

impl Expansion<'_> {
    /// Whether the line used any placeholder.
    pub fn is_ranged(&self) -> bool {
        self.outer
    }
}

impl Iterator for Expansion<'_> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let step = self.next;
        self.next += 1;

        if !self.outer {
            return Some((self.code.to_string(), self.literal.to_string()));
        }

        let (d, e) = if self.inner {
            (step >> 8, step & 0xFF)
        } else {
            (step, 0)
        };

        let d = format!("{:02X}", d);
        let mut code = self.code.replace(OUTER, &d);
        let mut literal = self.literal.replace(OUTER, &d);

        if self.inner {
            let e = format!("{:02X}", e);
            code = code.replace(INNER, &e);
            literal = literal.replace(INNER, &e);
        }

        Some((code, literal))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Expansion<'_> {}
