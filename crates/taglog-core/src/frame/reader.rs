use super::error::FrameError;

/// Cursor over the labeled fields of a tagged line.
pub struct TagReader<'a> {
    rest: &'a str,
}

impl<'a> TagReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    pub fn rest(&self) -> &'a str {
        self.rest
    }

    /// Consume `label` (e.g. `NAME:`) at the cursor.
    pub fn expect_label(&mut self, label: &'static str) -> Result<(), FrameError> {
        match self.rest.strip_prefix(label) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(FrameError::MissingLabel {
                label: label_name(label),
            }),
        }
    }

    /// Consume the longest non-empty run of chars accepted by `accept`.
    pub fn take_value(
        &mut self,
        label: &'static str,
        accept: impl Fn(char) -> bool,
    ) -> Result<&'a str, FrameError> {
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| !accept(*c))
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(FrameError::EmptyValue {
                label: label_name(label),
            });
        }
        let (value, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(value)
    }

    /// Consume at least one whitespace char following the `label` value.
    pub fn expect_separator(&mut self, label: &'static str) -> Result<(), FrameError> {
        let trimmed = self.rest.trim_start();
        if trimmed.len() == self.rest.len() {
            return Err(FrameError::MissingSeparator {
                label: label_name(label),
            });
        }
        self.rest = trimmed;
        Ok(())
    }
}

fn label_name(label: &'static str) -> &'static str {
    label.trim_end_matches(':')
}

#[cfg(test)]
mod tests {
    use super::TagReader;
    use crate::frame::error::FrameError;

    #[test]
    fn expect_label_advances() {
        let mut reader = TagReader::new("NAME:Foo");
        reader.expect_label("NAME:").unwrap();
        assert_eq!(reader.rest(), "Foo");
    }

    #[test]
    fn expect_label_is_case_sensitive() {
        let mut reader = TagReader::new("name:Foo");
        let err = reader.expect_label("NAME:").unwrap_err();
        assert_eq!(err, FrameError::MissingLabel { label: "NAME" });
    }

    #[test]
    fn take_value_stops_at_rejected_char() {
        let mut reader = TagReader::new("abc_1 rest");
        let value = reader
            .take_value("NAME:", |c| c.is_alphanumeric() || c == '_')
            .unwrap();
        assert_eq!(value, "abc_1");
        assert_eq!(reader.rest(), " rest");
    }

    #[test]
    fn take_value_rejects_empty_run() {
        let mut reader = TagReader::new(" x");
        let err = reader.take_value("LEN:", |c| c.is_ascii_digit()).unwrap_err();
        assert_eq!(err, FrameError::EmptyValue { label: "LEN" });
    }

    #[test]
    fn separator_accepts_mixed_whitespace() {
        let mut reader = TagReader::new(" \t FORMAT:<I");
        reader.expect_separator("NAME:").unwrap();
        assert_eq!(reader.rest(), "FORMAT:<I");
    }

    #[test]
    fn separator_required() {
        let mut reader = TagReader::new("FORMAT:<I");
        let err = reader.expect_separator("NAME:").unwrap_err();
        assert_eq!(err, FrameError::MissingSeparator { label: "NAME" });
    }
}
