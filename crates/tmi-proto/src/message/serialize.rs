use std::fmt::{self, Display, Formatter};

use super::types::Message;

/// Writes the line without CR/LF framing; the codec adds it.
impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.tags.is_empty() {
            write!(f, "@{} ", self.tags)?;
        }

        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        f.write_str(&self.command)?;

        for param in &self.params {
            write!(f, " {}", param)?;
        }

        if let Some(ref trailing) = self.trailing {
            write!(f, " :{}", trailing)?;
        }

        Ok(())
    }
}
