//! Minimal gofmt-like pass for generated Go declarations.
//!
//! Only handles what the struct emitter produces: re-indents by block depth
//! with tabs, aligns the name/type/tag/comment columns of consecutive field
//! lines and collapses blank lines. Unbalanced delimiters are an error; the
//! caller falls back to the unformatted text.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unbalanced closing delimiter on line {line}")]
    Unbalanced { line: usize },
    #[error("{depth} block(s) left open at end of input")]
    Unclosed { depth: usize },
}

#[derive(Debug)]
struct Line<'a> {
    depth: usize,
    text: &'a str,
    cells: Option<Cells<'a>>,
}

/// `Name Type `tag` // comment`
#[derive(Debug, Clone, Copy)]
struct Cells<'a> {
    name: &'a str,
    ty: &'a str,
    tag: &'a str,
    comment: Option<&'a str>,
}

pub fn format_go(src: &str) -> Result<String, FormatError> {
    let mut depth = 0usize;
    let mut lines: Vec<Option<Line>> = Vec::new(); // None = blank

    for (n, raw) in src.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            if matches!(lines.last(), Some(Some(_))) {
                lines.push(None);
            }
            continue;
        }
        let code = code_part(text);
        if code.starts_with('}') || code.starts_with(')') {
            depth = depth
                .checked_sub(1)
                .ok_or(FormatError::Unbalanced { line: n + 1 })?;
        }
        let opens = code.ends_with('{') || code.ends_with('(');
        let cells = if opens { None } else { split_cells(text) };
        lines.push(Some(Line { depth, text, cells }));
        if opens {
            depth += 1;
        }
    }
    if depth != 0 {
        return Err(FormatError::Unclosed { depth });
    }
    while matches!(lines.last(), Some(None)) {
        lines.pop();
    }

    let mut out = String::with_capacity(src.len() + src.len() / 4);
    let mut i = 0;
    while i < lines.len() {
        match &lines[i] {
            None => {
                out.push('\n');
                i += 1;
            }
            Some(line) if line.cells.is_none() => {
                push_indent(&mut out, line.depth);
                out.push_str(line.text);
                out.push('\n');
                i += 1;
            }
            Some(first) => {
                // run of consecutive field lines at the same depth
                let mut end = i;
                while let Some(Some(l)) = lines.get(end) {
                    if l.cells.is_none() || l.depth != first.depth {
                        break;
                    }
                    end += 1;
                }
                let run: Vec<(usize, Cells)> = lines[i..end]
                    .iter()
                    .flatten()
                    .filter_map(|l| l.cells.map(|c| (l.depth, c)))
                    .collect();
                write_aligned(&mut out, &run);
                i = end;
            }
        }
    }
    Ok(out)
}

fn column_width(run: &[(usize, Cells)], cell: impl Fn(&Cells) -> Option<usize>) -> usize {
    run.iter().filter_map(|(_, c)| cell(c)).max().unwrap_or(0)
}

fn write_aligned(out: &mut String, run: &[(usize, Cells)]) {
    let name_w = column_width(run, |c| Some(c.name.chars().count()));
    let ty_w = column_width(run, |c| Some(c.ty.chars().count()));
    let tag_ws = comment_tag_widths(run);

    for ((depth, c), tag_w) in run.iter().zip(tag_ws) {
        push_indent(out, *depth);
        out.push_str(&format!("{:<name_w$} {:<ty_w$} ", c.name, c.ty));
        match c.comment {
            Some(comment) => out.push_str(&format!("{:<tag_w$} {comment}", c.tag)),
            None => out.push_str(c.tag),
        }
        out.push('\n');
    }
}

/// Tag padding per line. Only consecutive commented lines share a comment
/// column; an uncommented line ends the block, as in gofmt's tabwriter.
fn comment_tag_widths(run: &[(usize, Cells)]) -> Vec<usize> {
    let mut widths = vec![0; run.len()];
    let mut start = 0;
    while start < run.len() {
        if run[start].1.comment.is_none() {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < run.len() && run[end].1.comment.is_some() {
            end += 1;
        }
        let w = column_width(&run[start..end], |c| Some(c.tag.chars().count()));
        widths[start..end].fill(w);
        start = end;
    }
    widths
}

fn push_indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat_n('\t', depth));
}

/// Split a field line into cells. Lines without a struct tag are left alone.
fn split_cells(text: &str) -> Option<Cells<'_>> {
    let tag_start = text.find('`')?;
    let tag_len = text[tag_start + 1..].find('`')? + 2;
    let tag = &text[tag_start..tag_start + tag_len];

    let head = text[..tag_start].trim_end();
    let (name, ty) = head.split_once(char::is_whitespace)?;
    let ty = ty.trim();
    if ty.is_empty() {
        return None;
    }

    let rest = text[tag_start + tag_len..].trim();
    let comment = match rest {
        "" => None,
        r if r.starts_with("//") => Some(r),
        _ => return None,
    };
    Some(Cells { name, ty, tag, comment })
}

/// The line with any trailing `//` comment removed. Quotes and backticks are
/// respected so tags and string literals containing `//` survive.
fn code_part(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == b'\\' && q == b'"' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'`' => quote = Some(b),
            None if b == b'/' && bytes.get(i + 1) == Some(&b'/') => return text[..i].trim_end(),
            None => {}
        }
        i += 1;
    }
    text
}
