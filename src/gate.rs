use std::io::{self, BufRead, StdinLock};

/// Blocks the pipeline until the user is ready for the histogram.
pub trait Confirmation {
    fn confirm(&mut self) -> io::Result<()>;
}

/// Waits for one line (or end of input) from a reader.
pub struct LineGate<R> {
    reader: R,
}

impl<R: BufRead> LineGate<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LineGate<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Confirmation for LineGate<R> {
    fn confirm(&mut self) -> io::Result<()> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        log::debug!("confirmation gate released after {read} bytes");
        Ok(())
    }
}

/// Never blocks. Used for `--yes`.
pub struct AutoConfirm;

impl Confirmation for AutoConfirm {
    fn confirm(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn any_line_releases_the_gate() {
        let mut gate = LineGate::new(Cursor::new("q\nrest\n"));
        gate.confirm().unwrap();
        let mut rest = String::new();
        gate.reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "rest\n");
    }

    #[test]
    fn empty_line_and_eof_release_the_gate() {
        LineGate::new(Cursor::new("\n")).confirm().unwrap();
        LineGate::new(Cursor::new("")).confirm().unwrap();
        AutoConfirm.confirm().unwrap();
    }
}
