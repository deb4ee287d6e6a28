use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Kinds of pending change reported for a single path.
    ///
    /// Declaration order is the classification priority: iteration yields the
    /// set flags from `PRIVATE` to `DELETED`, and every derived field of a
    /// normalized status walks the flags in that order.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ChangeKind: u8 {
        const PRIVATE = 0b00_0001;
        const ADDED = 0b00_0010;
        const CHANGED = 0b00_0100;
        const MOVED = 0b00_1000;
        const CHECKED_OUT = 0b01_0000;
        const DELETED = 0b10_0000;
    }
}

/// Machine-readable status codes understood by the shell's `status` command
pub const STATUS_CODES: phf::Map<&'static str, ChangeKind> = phf::phf_map! {
    "PR" => ChangeKind::PRIVATE,
    "AD" => ChangeKind::ADDED,
    "CH" => ChangeKind::CHANGED,
    "MV" => ChangeKind::MOVED,
    "LM" => ChangeKind::MOVED,
    "CO" => ChangeKind::CHECKED_OUT,
    "DE" => ChangeKind::DELETED,
    "LD" => ChangeKind::DELETED,
};

const LETTERS: [(ChangeKind, char); 6] = [
    (ChangeKind::PRIVATE, 'P'),
    (ChangeKind::ADDED, 'A'),
    (ChangeKind::CHANGED, 'C'),
    (ChangeKind::MOVED, 'M'),
    (ChangeKind::CHECKED_OUT, 'C'),
    (ChangeKind::DELETED, 'D'),
];

impl ChangeKind {
    /// Parses a list of status codes such as `MV,CH` or `CO+DE`
    pub fn try_parse(codes: &str) -> Option<Self> {
        let mut kind = Self::empty();

        for code in codes.split([',', '+']).map(str::trim) {
            kind |= *STATUS_CODES.get(code)?;
        }

        (!kind.is_empty()).then_some(kind)
    }

    /// Single-letter code of a one-flag kind
    pub fn letter(self) -> Option<char> {
        LETTERS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, letter)| *letter)
    }
}

impl fmt::Debug for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }

        let labels = self.iter_names().map(|(name, _)| name).collect::<Vec<_>>();
        write!(f, "{}", labels.join("|"))
    }
}
