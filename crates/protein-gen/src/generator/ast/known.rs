//! Framework classes referenced by generated code.

use super::ClassName;

const ROOM: &str = "androidx.room";

pub(crate) fn serialized_name() -> ClassName {
  ClassName::new("com.google.gson.annotations", "SerializedName")
}

pub(crate) fn parcelize() -> ClassName {
  ClassName::new("kotlinx.parcelize", "Parcelize")
}

pub(crate) fn parcelable() -> ClassName {
  ClassName::new("android.os", "Parcelable")
}

pub(crate) fn live_data() -> ClassName {
  ClassName::new("androidx.lifecycle", "LiveData")
}

pub(crate) fn room_entity() -> ClassName {
  ClassName::new(ROOM, "Entity")
}

pub(crate) fn room_column_info() -> ClassName {
  ClassName::new(ROOM, "ColumnInfo")
}

pub(crate) fn room_primary_key() -> ClassName {
  ClassName::new(ROOM, "PrimaryKey")
}

pub(crate) fn room_foreign_key() -> ClassName {
  ClassName::new(ROOM, "ForeignKey")
}

pub(crate) fn room_index() -> ClassName {
  ClassName::new(ROOM, "Index")
}

pub(crate) fn room_dao() -> ClassName {
  ClassName::new(ROOM, "Dao")
}

pub(crate) fn room_query() -> ClassName {
  ClassName::new(ROOM, "Query")
}

pub(crate) fn room_database() -> ClassName {
  ClassName::new(ROOM, "Database")
}

pub(crate) fn room_database_base() -> ClassName {
  ClassName::new(ROOM, "RoomDatabase")
}
