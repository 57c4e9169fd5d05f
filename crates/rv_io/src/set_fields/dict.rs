// crates/rv_io/src/set_fields/dict.rs

//! setFieldsDict 结构化解析
//!
//! 只识别修改所需的结构：顶层的 `regions` 关键字及其后的平衡括号列表。
//! 文档被拆分为 `head`（直到并包括 `(`）、条目列表与 `tail`（从 `)` 开始），
//! 其余内容原样保留。注释 (`//`、`/* */`) 与字符串中的括号不参与匹配。

use rv_config::SpliceMode;

use crate::error::{IoError, IoResult};

const REGIONS_KEYWORD: &str = "regions";
const ENTRY_INDENT: &str = "    ";

/// 解析后的 setFieldsDict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFieldsDict {
    head: String,
    entries: Vec<String>,
    tail: String,
}

/// 拼接统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpliceSummary {
    /// 新插入的条目数
    pub inserted: usize,
    /// 保留的原有条目数
    pub kept: usize,
    /// 删除的原有条目数
    pub removed: usize,
}

impl SetFieldsDict {
    /// 解析字典文本，`file` 仅用于错误信息
    pub fn parse(text: &str, file: &str) -> IoResult<Self> {
        let mut scanner = Scanner::new(text, file);
        let keyword_end = scanner.find_top_level_keyword(REGIONS_KEYWORD)?.ok_or_else(|| {
            IoError::MissingRegions {
                file: file.to_string(),
            }
        })?;

        scanner.pos = keyword_end;
        scanner.skip_trivia()?;
        if scanner.peek() != Some(b'(') {
            return Err(IoError::unbalanced(
                file,
                scanner.line_of(scanner.pos),
                "regions 之后应为 '('",
            ));
        }
        let open = scanner.pos;
        let (entries, close) = scanner.scan_list(open)?;

        Ok(Self {
            head: text[..=open].to_string(),
            entries,
            tail: text[close..].to_string(),
        })
    }

    /// 当前条目
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 合并新条目
    pub fn splice(&mut self, new_entries: Vec<String>, mode: SpliceMode) -> SpliceSummary {
        let inserted = new_entries.len();
        let previous = std::mem::replace(&mut self.entries, new_entries);
        match mode {
            SpliceMode::Prepend => {
                let kept = previous.len();
                self.entries.extend(previous);
                SpliceSummary {
                    inserted,
                    kept,
                    removed: 0,
                }
            }
            SpliceMode::Replace => SpliceSummary {
                inserted,
                kept: 0,
                removed: previous.len(),
            },
        }
    }

    /// 重新生成字典文本
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.head.len()
                + self.tail.len()
                + self.entries.iter().map(|e| e.len() + 64).sum::<usize>(),
        );
        out.push_str(&self.head);
        out.push('\n');
        for entry in &self.entries {
            for line in entry.lines() {
                if !line.trim().is_empty() {
                    out.push_str(ENTRY_INDENT);
                    out.push_str(line);
                }
                out.push('\n');
            }
        }
        out.push_str(&self.tail);
        out
    }
}

/// 字节级扫描器
struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    file: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, file: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            file,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn line_of(&self, offset: usize) -> usize {
        self.bytes[..offset.min(self.bytes.len())]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }

    /// 若当前位置是注释或字符串，跳过并返回 true
    fn skip_comment_or_string(&mut self) -> IoResult<bool> {
        let start = self.pos;
        match (self.peek(), self.bytes.get(self.pos + 1).copied()) {
            (Some(b'/'), Some(b'/')) => {
                self.pos = self.text[start..]
                    .find('\n')
                    .map_or(self.bytes.len(), |i| start + i + 1);
                Ok(true)
            }
            (Some(b'/'), Some(b'*')) => match self.text[start + 2..].find("*/") {
                Some(i) => {
                    self.pos = start + 2 + i + 2;
                    Ok(true)
                }
                None => Err(IoError::unbalanced(self.file, self.line_of(start), "块注释未闭合")),
            },
            (Some(b'"'), _) => {
                let mut i = start + 1;
                while i < self.bytes.len() {
                    match self.bytes[i] {
                        b'\\' => i += 2,
                        b'"' => {
                            self.pos = i + 1;
                            return Ok(true);
                        }
                        _ => i += 1,
                    }
                }
                Err(IoError::unbalanced(self.file, self.line_of(start), "字符串未闭合"))
            }
            _ => Ok(false),
        }
    }

    fn skip_trivia(&mut self) -> IoResult<()> {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'"' || !self.skip_comment_or_string()? {
                break;
            }
        }
        Ok(())
    }

    /// 查找顶层关键字，返回关键字之后的位置
    fn find_top_level_keyword(&mut self, keyword: &str) -> IoResult<Option<usize>> {
        let mut depth: i64 = 0;
        let mut last_open = 0;
        while let Some(b) = self.peek() {
            if self.skip_comment_or_string()? {
                continue;
            }
            match b {
                b'(' | b'{' => {
                    depth += 1;
                    last_open = self.pos;
                    self.pos += 1;
                }
                b')' | b'}' => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(IoError::unbalanced(
                            self.file,
                            self.line_of(self.pos),
                            format!("多余的 '{}'", b as char),
                        ));
                    }
                    self.pos += 1;
                }
                _ if is_word_start(b) => {
                    let start = self.pos;
                    while self.peek().is_some_and(is_word_char) {
                        self.pos += 1;
                    }
                    if depth == 0 && &self.text[start..self.pos] == keyword {
                        return Ok(Some(self.pos));
                    }
                }
                _ => self.pos += 1,
            }
        }
        if depth > 0 {
            return Err(IoError::unbalanced(
                self.file,
                self.line_of(last_open),
                "括号未闭合",
            ));
        }
        Ok(None)
    }

    /// 扫描从 `open` 开始的列表，返回条目与闭括号位置
    fn scan_list(&mut self, open: usize) -> IoResult<(Vec<String>, usize)> {
        let mut entries = Vec::new();
        let mut parens = 1usize;
        let mut braces = 0usize;
        let mut entry_start: Option<usize> = None;
        self.pos = open + 1;

        while let Some(b) = self.peek() {
            if entry_start.is_none() && !b.is_ascii_whitespace() && !(b == b')' && parens == 1) {
                entry_start = Some(self.pos);
            }
            if self.skip_comment_or_string()? {
                continue;
            }
            match b {
                b'(' => parens += 1,
                b')' => {
                    parens -= 1;
                    if parens == 0 {
                        if braces != 0 {
                            return Err(IoError::unbalanced(
                                self.file,
                                self.line_of(self.pos),
                                "条目的 '{' 未闭合",
                            ));
                        }
                        let close = self.pos;
                        if let Some(start) = entry_start {
                            self.push_entry(&mut entries, start, close);
                        }
                        return Ok((entries, close));
                    }
                }
                b'{' => braces += 1,
                b'}' => {
                    if braces == 0 {
                        return Err(IoError::unbalanced(
                            self.file,
                            self.line_of(self.pos),
                            "多余的 '}'",
                        ));
                    }
                    braces -= 1;
                    if braces == 0 && parens == 1 {
                        if let Some(start) = entry_start.take() {
                            self.push_entry(&mut entries, start, self.pos + 1);
                        }
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }

        Err(IoError::unbalanced(
            self.file,
            self.line_of(open),
            "regions 列表缺少 ')'",
        ))
    }

    fn push_entry(&self, entries: &mut Vec<String>, start: usize, end: usize) {
        let raw = &self.text[start..end];
        if raw.trim().is_empty() {
            return;
        }
        let line_start = self.text[..start].rfind('\n').map_or(0, |i| i + 1);
        let column = start - line_start;
        entries.push(dedent(raw.trim_end(), column));
    }
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':')
}

/// 去掉后续行至多 `column` 个前导空白
fn dedent(text: &str, column: usize) -> String {
    let mut lines = text.lines();
    let mut out = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        let strip = line
            .bytes()
            .take(column)
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        out.push_str(&line[strip..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DICT: &str = r#"FoamFile
{
    version     2.0;
    format      ascii;
    class       dictionary;
    object      setFieldsDict;
}
// regions ( commented out ) should be ignored
defaultFieldValues
(
    volScalarFieldValue alpha.liquid 0
    volVectorFieldValue U (0 0 0)
);

regions
(
    boxToCell
    {
        box (0 0 0) (1 1 1);
        fieldValues
        (
            volScalarFieldValue alpha.liquid 1
        );
    }

    /* second region */
    sphereToCell
    {
        centre (0 0 0);
        radius 0.5;
        fieldValues ( volScalarFieldValue alpha.liquid 1 );
    }
);

// ************************************************************************* //
"#;

    #[test]
    fn test_parse_finds_top_level_regions() {
        let dict = SetFieldsDict::parse(DICT, "setFieldsDict").unwrap();
        assert_eq!(dict.entries().len(), 2);
        assert!(dict.entries()[0].starts_with("boxToCell"));
        assert!(dict.entries()[1].starts_with("/* second region */"));
        assert!(dict.entries()[1].contains("sphereToCell"));
        assert!(dict.head.ends_with("regions\n("));
        assert!(dict.tail.starts_with(");"));
    }

    #[test]
    fn test_entries_are_dedented() {
        let dict = SetFieldsDict::parse(DICT, "setFieldsDict").unwrap();
        let lines: Vec<_> = dict.entries()[0].lines().collect();
        assert_eq!(lines[1], "{");
        assert_eq!(lines[2], "    box (0 0 0) (1 1 1);");
    }

    #[test]
    fn test_prepend_keeps_existing_entries() {
        let mut dict = SetFieldsDict::parse(DICT, "setFieldsDict").unwrap();
        let summary = dict.splice(vec!["cylinderToCell\n{\n}".to_string()], SpliceMode::Prepend);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.kept, 2);
        assert!(dict.entries()[0].starts_with("cylinderToCell"));

        let rendered = dict.render();
        let cyl = rendered.find("cylinderToCell").unwrap();
        let boxed = rendered.find("boxToCell").unwrap();
        assert!(cyl < boxed);
        assert!(rendered.contains("defaultFieldValues"));

        // 结果仍可解析
        let reparsed = SetFieldsDict::parse(&rendered, "setFieldsDict").unwrap();
        assert_eq!(reparsed.entries().len(), 3);
    }

    #[test]
    fn test_replace_drops_existing_entries() {
        let mut dict = SetFieldsDict::parse(DICT, "setFieldsDict").unwrap();
        let summary = dict.splice(vec!["cylinderToCell\n{\n}".to_string()], SpliceMode::Replace);
        assert_eq!(summary.removed, 2);
        let rendered = dict.render();
        assert!(!rendered.contains("sphereToCell"));
        assert!(rendered.contains("object      setFieldsDict;"));
    }

    #[test]
    fn test_empty_regions_list() {
        let text = "regions\n(\n);\n";
        let dict = SetFieldsDict::parse(text, "d").unwrap();
        assert!(dict.entries().is_empty());
        assert_eq!(dict.render(), "regions\n(\n);\n");
    }

    #[test]
    fn test_missing_regions() {
        let text = "FoamFile { version 2.0; }\n// regions (\n";
        let err = SetFieldsDict::parse(text, "d").unwrap_err();
        assert!(matches!(err, IoError::MissingRegions { .. }));
    }

    #[test]
    fn test_nested_regions_keyword_is_not_top_level() {
        let err = SetFieldsDict::parse("outer { regions ( ); }\n", "d").unwrap_err();
        assert!(matches!(err, IoError::MissingRegions { .. }));
    }

    #[test]
    fn test_unclosed_list_reports_line() {
        let text = "FoamFile\n{\n}\nregions\n(\n    boxToCell\n    {\n    }\n";
        match SetFieldsDict::parse(text, "d").unwrap_err() {
            IoError::Unbalanced { line, .. } => assert_eq!(line, 5),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_block_comment() {
        let err = SetFieldsDict::parse("regions\n(\n/* open\n);\n", "d").unwrap_err();
        assert!(matches!(err, IoError::Unbalanced { .. }));
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = SetFieldsDict::parse("regions\n(\n boxToCell { } }\n);\n", "d").unwrap_err();
        assert!(matches!(err, IoError::Unbalanced { line: 3, .. }));
    }
}
