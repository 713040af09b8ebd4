//! Scrollable cursor over a materialized result set.
//!
//! Mirrors a scroll-insensitive JDBC `ResultSet`: the position may sit before
//! the first row, on a row, or after the last row, and moves one step at a
//! time in either direction.

/// Cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    On(usize),
    AfterLast,
}

#[derive(Debug)]
pub struct ScrollCursor<R> {
    rows: Vec<R>,
    position: Position,
}

impl<R> ScrollCursor<R> {
    /// New cursor, positioned before the first row.
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            position: Position::BeforeFirst,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn before_first(&mut self) {
        self.position = Position::BeforeFirst;
    }

    pub fn after_last(&mut self) {
        self.position = Position::AfterLast;
    }

    /// Step forward. Returns false once the cursor has moved past the last row.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        self.position = match self.position {
            Position::BeforeFirst if !self.rows.is_empty() => Position::On(0),
            Position::On(i) if i + 1 < self.rows.len() => Position::On(i + 1),
            _ => Position::AfterLast,
        };
        matches!(self.position, Position::On(_))
    }

    /// Step backward. Returns false once the cursor has moved before the first row.
    pub fn previous(&mut self) -> bool {
        self.position = match self.position {
            Position::AfterLast if !self.rows.is_empty() => Position::On(self.rows.len() - 1),
            Position::On(i) if i > 0 => Position::On(i - 1),
            _ => Position::BeforeFirst,
        };
        matches!(self.position, Position::On(_))
    }

    /// Row under the cursor, if it is on one.
    pub fn current(&self) -> Option<&R> {
        match self.position {
            Position::On(i) => self.rows.get(i),
            _ => None,
        }
    }
}

/// Direction a `RowStream` walks its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// From before the first row, stepping with `next`.
    Forward,
    /// From after the last row, stepping with `previous`.
    Reverse,
}

/// Lazy, single-pass iterator that decodes rows as the cursor reaches them.
///
/// Owns the cursor, so the rows are released when the stream is dropped.
pub struct RowStream<R, F> {
    cursor: ScrollCursor<R>,
    traversal: Traversal,
    decode: F,
}

impl<R, T, E, F> RowStream<R, F>
where
    F: FnMut(&R) -> Result<T, E>,
{
    pub fn new(mut cursor: ScrollCursor<R>, traversal: Traversal, decode: F) -> Self {
        match traversal {
            Traversal::Forward => cursor.before_first(),
            Traversal::Reverse => cursor.after_last(),
        }
        Self {
            cursor,
            traversal,
            decode,
        }
    }
}

impl<R, T, E, F> Iterator for RowStream<R, F>
where
    F: FnMut(&R) -> Result<T, E>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let moved = match self.traversal {
            Traversal::Forward => self.cursor.next(),
            Traversal::Reverse => self.cursor.previous(),
        };
        if !moved {
            return None;
        }
        self.cursor.current().map(&mut self.decode)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor.len()))
    }
}
