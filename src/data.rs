use std::slice;

use time::{get_time, Timespec};

use errors::*;

// Year 1 through year 9999, the span the table can render.
const MIN_SEC: i64 = -62_135_596_800;
const MAX_SEC: i64 = 253_402_300_799;
const NSEC_PER_SEC: i32 = 1_000_000_000;

/// Fails for stamps outside the renderable range or with a bad nanosecond part.
pub fn check_timestamp(ts: Timespec) -> Result<()> {
    if ts.sec < MIN_SEC || ts.sec > MAX_SEC || ts.nsec < 0 || ts.nsec >= NSEC_PER_SEC {
        bail!(ErrorKind::InvalidTimestamp(ts.sec, ts.nsec));
    }

    Ok(())
}

/// A single entry in the reading list.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub read: bool,
    #[serde(with = "TimespecDef")]
    pub added_at: Timespec,
    #[serde(with = "opt_timespec")]
    pub finished_at: Option<Timespec>,
    /// 0 means unrated, otherwise 1 through 5.
    pub rating: u8,
}

impl Book {
    pub fn new(title: &str, author: &str) -> Book {
        Book {
            title: title.to_owned(),
            author: author.to_owned(),
            read: false,
            added_at: get_time(),
            finished_at: None,
            rating: 0,
        }
    }

    pub fn status(&self) -> &'static str {
        if self.read { "Read" } else { "Unread" }
    }

    fn check(&self) -> Result<()> {
        if self.rating > 5 {
            bail!(format!("rating {} is not between 0 and 5", self.rating));
        }

        match (self.read, self.finished_at) {
            (true, None) => bail!("read but has no finish time"),
            (false, Some(_)) => bail!("unread but has a finish time"),
            _ => {}
        }

        check_timestamp(self.added_at)?;
        if let Some(finished) = self.finished_at {
            check_timestamp(finished)?;
        }

        Ok(())
    }
}

/// The ordered book list. A book's position is its index for every command,
/// so deleting a book shifts every later index down by one.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Books(Vec<Book>);

impl Books {
    pub fn new() -> Books {
        Books(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&Book> {
        self.0.get(index)
    }

    pub fn iter(&self) -> slice::Iter<Book> {
        self.0.iter()
    }

    pub fn add(&mut self, title: &str, author: &str) -> &Book {
        self.0.push(Book::new(title, author));
        &self.0[self.0.len() - 1]
    }

    /// Verifies every record holds the invariants the operations maintain:
    /// rating in 0..=5, `finished_at` present exactly when read, and
    /// renderable timestamps.
    pub fn check(&self) -> Result<()> {
        for (index, book) in self.0.iter().enumerate() {
            book.check().chain_err(|| ErrorKind::InvalidRecord(index))?;
        }

        Ok(())
    }

    pub fn delete(&mut self, index: i64) -> Result<Book> {
        let index = self.check_index(index)?;

        Ok(self.0.remove(index))
    }

    /// Flips the read flag. Finishing a book stamps `finished_at` with the
    /// current time, un-finishing it clears the stamp.
    pub fn toggle_read(&mut self, index: i64) -> Result<&Book> {
        let index = self.check_index(index)?;

        let book = &mut self.0[index];
        book.read = !book.read;
        book.finished_at = if book.read { Some(get_time()) } else { None };

        Ok(book)
    }

    pub fn rate(&mut self, index: i64, rating: i64) -> Result<&Book> {
        let index = self.check_index(index)?;

        if rating < 1 || rating > 5 {
            bail!(ErrorKind::InvalidRating(rating));
        }

        let book = &mut self.0[index];
        book.rating = rating as u8;

        Ok(book)
    }

    /// Empty `title` or `author` leaves that field as it was.
    pub fn edit(&mut self, index: i64, title: &str, author: &str) -> Result<&Book> {
        let index = self.check_index(index)?;

        let book = &mut self.0[index];

        if !title.is_empty() {
            book.title = title.to_owned();
        }

        if !author.is_empty() {
            book.author = author.to_owned();
        }

        Ok(book)
    }

    /// Valid indices are `0 <= index < len`.
    fn check_index(&self, index: i64) -> Result<usize> {
        if index >= 0 && (index as u64) < self.0.len() as u64 {
            Ok(index as usize)
        } else {
            Err(ErrorKind::IndexOutOfRange(index, self.0.len()).into())
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Timespec")]
struct TimespecDef {
    sec: i64,
    nsec: i32,
}

mod opt_timespec {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::Timespec;

    use super::TimespecDef;

    #[derive(Serialize, Deserialize)]
    struct Stamp(#[serde(with = "TimespecDef")] Timespec);

    pub fn serialize<S>(value: &Option<Timespec>, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        value.map(Stamp).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timespec>, D::Error>
        where D: Deserializer<'de>
    {
        let stamp: Option<Stamp> = Option::deserialize(deserializer)?;
        Ok(stamp.map(|Stamp(ts)| ts))
    }
}
