//! Deletion policies for the foreign keys between marketplace records.
//!
//! The migrations declare the same `ON DELETE` clauses. Services apply the
//! effect explicitly inside the deleting transaction and report how many
//! dependents it touched.

/// What happens to dependent rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Dependents are deleted with the parent.
    Cascade,
    /// Dependents survive with the reference cleared.
    SetNull,
}

/// A foreign key from `child_table.column` to a parent table.
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    pub child_table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

impl Relation {
    /// SQL statement applying the deletion policy to the dependents of `$1`.
    pub fn dependents_statement(&self) -> String {
        match self.on_delete {
            OnDelete::Cascade => {
                format!("DELETE FROM {} WHERE {} = $1", self.child_table, self.column)
            }
            OnDelete::SetNull => format!(
                "UPDATE {} SET {} = NULL WHERE {} = $1",
                self.child_table, self.column, self.column
            ),
        }
    }
}

/// Course → Author: removing an author removes their courses.
pub const COURSE_AUTHOR: Relation = Relation {
    child_table: "courses",
    column: "author_id",
    on_delete: OnDelete::Cascade,
};

/// Course → Category: removing a category leaves its courses uncategorised.
pub const COURSE_CATEGORY: Relation = Relation {
    child_table: "courses",
    column: "category_id",
    on_delete: OnDelete::SetNull,
};
