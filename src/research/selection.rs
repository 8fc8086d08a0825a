//! 修订请求的选区处理
//!
//! 选区以字符（Unicode标量值）计数。负数按0处理，超出文档末尾的部分被截断。

/// 截断后的选区，按字节偏移表示，保证落在字符边界上
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// 把请求中的选区截断到文档范围内
    pub fn clamp(document: &str, selection_start: i64, selection_length: i64) -> Self {
        let start_chars = selection_start.max(0) as usize;
        let length_chars = selection_length.max(0) as usize;
        let end_chars = start_chars.saturating_add(length_chars);

        let start = byte_offset(document, start_chars);
        let end = byte_offset(document, end_chars);
        Self { start, end }
    }

    /// 拆分为选区前、选区内、选区后三段
    pub fn split<'a>(&self, document: &'a str) -> (&'a str, &'a str, &'a str) {
        (
            &document[..self.start],
            &document[self.start..self.end],
            &document[self.end..],
        )
    }

    /// 用新内容替换选区
    pub fn splice(&self, document: &str, replacement: &str) -> String {
        let (before, _, after) = self.split(document);
        let mut revised = String::with_capacity(before.len() + replacement.len() + after.len());
        revised.push_str(before);
        revised.push_str(replacement);
        revised.push_str(after);
        revised
    }
}

fn byte_offset(document: &str, chars: usize) -> usize {
    document
        .char_indices()
        .nth(chars)
        .map(|(offset, _)| offset)
        .unwrap_or(document.len())
}
