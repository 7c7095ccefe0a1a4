//! Column resolution and typed extraction for merge-table batches.
use arrow_array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, RecordBatch,
    StringArray, StringViewArray, UInt32Array,
};
use arrow_schema::{DataType, Schema};

use topiary_core::{MergeRecord, TopicId};

use crate::errors::TabularProviderError;

pub const PARENT_ID: &str = "Parent_ID";
pub const LEFT_CHILD_ID: &str = "Child_Left_ID";
pub const RIGHT_CHILD_ID: &str = "Child_Right_ID";
pub const LEFT_CHILD_NAME: &str = "Child_Left_Name";
pub const RIGHT_CHILD_NAME: &str = "Child_Right_Name";
pub const DISTANCE: &str = "Distance";

/// The columns a merge table is read from. Any other column is ignored.
pub const MERGE_COLUMNS: [&str; 6] = [
    PARENT_ID,
    LEFT_CHILD_ID,
    RIGHT_CHILD_ID,
    LEFT_CHILD_NAME,
    RIGHT_CHILD_NAME,
    DISTANCE,
];

const ID_TYPES: &str = "Int64, Int32, UInt32 or a string type holding integers";
const NAME_TYPES: &str = "Utf8, LargeUtf8 or Utf8View";
const DISTANCE_TYPES: &str = "Float64 or Float32";

#[derive(Clone, Copy)]
enum ColumnKind {
    Id,
    Name,
    Distance,
}

impl ColumnKind {
    fn of(column: &str) -> Self {
        match column {
            LEFT_CHILD_NAME | RIGHT_CHILD_NAME => Self::Name,
            DISTANCE => Self::Distance,
            _ => Self::Id,
        }
    }

    fn accepts(self, data_type: &DataType) -> bool {
        match self {
            // pandas writes BERTopic's ids as strings.
            Self::Id => matches!(
                data_type,
                DataType::Int64
                    | DataType::Int32
                    | DataType::UInt32
                    | DataType::Utf8
                    | DataType::LargeUtf8
                    | DataType::Utf8View
            ),
            Self::Name => matches!(
                data_type,
                DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
            ),
            Self::Distance => matches!(data_type, DataType::Float64 | DataType::Float32),
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::Id => ID_TYPES,
            Self::Name => NAME_TYPES,
            Self::Distance => DISTANCE_TYPES,
        }
    }

    /// Arrow type used when a delimited reader has to be told what to parse.
    pub(crate) const fn parse_type(self) -> DataType {
        match self {
            Self::Id => DataType::Int64,
            Self::Name => DataType::Utf8,
            Self::Distance => DataType::Float64,
        }
    }
}

/// Returns the type a delimited reader should parse `column` as.
pub(crate) fn delimited_type(column: &str) -> DataType {
    if MERGE_COLUMNS.contains(&column) {
        ColumnKind::of(column).parse_type()
    } else {
        DataType::Utf8
    }
}

/// Indices of the merge columns within one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MergeColumns {
    indices: [usize; 6],
}

impl MergeColumns {
    /// Locates and type-checks every merge column in `schema`.
    pub(crate) fn resolve(schema: &Schema) -> Result<Self, TabularProviderError> {
        let mut indices = [0_usize; 6];
        for (slot, column) in indices.iter_mut().zip(MERGE_COLUMNS) {
            let index =
                schema
                    .index_of(column)
                    .map_err(|_| TabularProviderError::ColumnNotFound {
                        column: column.to_owned(),
                    })?;
            let kind = ColumnKind::of(column);
            let actual = schema.field(index).data_type();
            if !kind.accepts(actual) {
                return Err(TabularProviderError::InvalidColumnType {
                    column: column.to_owned(),
                    expected: kind.expected(),
                    actual: actual.clone(),
                });
            }
            *slot = index;
        }
        Ok(Self { indices })
    }

    /// Appends one record per row of `batch`. `start_row` is the number of
    /// rows read from earlier batches and is used in error reports.
    pub(crate) fn append_batch(
        &self,
        batch: &RecordBatch,
        start_row: usize,
        out: &mut Vec<MergeRecord>,
    ) -> Result<(), TabularProviderError> {
        let [parent, left, right, left_name, right_name, distance] =
            self.indices.map(|index| batch.column(index).as_ref());
        out.reserve(batch.num_rows());
        for row in 0..batch.num_rows() {
            let at = Cell { row, start_row };
            out.push(MergeRecord::new(
                at.id(parent, PARENT_ID)?,
                at.id(left, LEFT_CHILD_ID)?,
                at.id(right, RIGHT_CHILD_ID)?,
                at.name(left_name, LEFT_CHILD_NAME)?,
                at.name(right_name, RIGHT_CHILD_NAME)?,
                at.distance(distance, DISTANCE)?,
            ));
        }
        Ok(())
    }
}

/// A row position within one batch.
#[derive(Clone, Copy)]
struct Cell {
    row: usize,
    start_row: usize,
}

impl Cell {
    fn check_null(self, array: &dyn Array, column: &str) -> Result<(), TabularProviderError> {
        if array.is_null(self.row) {
            return Err(TabularProviderError::NullValue {
                column: column.to_owned(),
                row: self.start_row + self.row,
            });
        }
        Ok(())
    }

    fn id(self, array: &dyn Array, column: &str) -> Result<TopicId, TabularProviderError> {
        self.check_null(array, column)?;
        let values = array.as_any();
        if let Some(ids) = values.downcast_ref::<Int64Array>() {
            return Ok(ids.value(self.row));
        }
        if let Some(ids) = values.downcast_ref::<Int32Array>() {
            return Ok(TopicId::from(ids.value(self.row)));
        }
        if let Some(ids) = values.downcast_ref::<UInt32Array>() {
            return Ok(TopicId::from(ids.value(self.row)));
        }
        if let Some(ids) = values.downcast_ref::<StringArray>() {
            return self.parse_id(ids.value(self.row), column);
        }
        if let Some(ids) = values.downcast_ref::<LargeStringArray>() {
            return self.parse_id(ids.value(self.row), column);
        }
        if let Some(ids) = values.downcast_ref::<StringViewArray>() {
            return self.parse_id(ids.value(self.row), column);
        }
        Err(invalid_type(array, column, ColumnKind::Id))
    }

    fn parse_id(self, text: &str, column: &str) -> Result<TopicId, TabularProviderError> {
        text.trim()
            .parse()
            .map_err(|_| TabularProviderError::InvalidId {
                column: column.to_owned(),
                row: self.start_row + self.row,
                value: text.to_owned(),
            })
    }

    fn name<'a>(self, array: &'a dyn Array, column: &str) -> Result<&'a str, TabularProviderError> {
        self.check_null(array, column)?;
        let values = array.as_any();
        if let Some(names) = values.downcast_ref::<StringArray>() {
            return Ok(names.value(self.row));
        }
        if let Some(names) = values.downcast_ref::<LargeStringArray>() {
            return Ok(names.value(self.row));
        }
        if let Some(names) = values.downcast_ref::<StringViewArray>() {
            return Ok(names.value(self.row));
        }
        Err(invalid_type(array, column, ColumnKind::Name))
    }

    fn distance(self, array: &dyn Array, column: &str) -> Result<f64, TabularProviderError> {
        self.check_null(array, column)?;
        let values = array.as_any();
        if let Some(distances) = values.downcast_ref::<Float64Array>() {
            return Ok(distances.value(self.row));
        }
        if let Some(distances) = values.downcast_ref::<Float32Array>() {
            return Ok(f64::from(distances.value(self.row)));
        }
        Err(invalid_type(array, column, ColumnKind::Distance))
    }
}

fn invalid_type(array: &dyn Array, column: &str, kind: ColumnKind) -> TabularProviderError {
    TabularProviderError::InvalidColumnType {
        column: column.to_owned(),
        expected: kind.expected(),
        actual: array.data_type().clone(),
    }
}
