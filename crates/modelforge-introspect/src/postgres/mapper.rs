use modelforge_core::ColumnDescriptor;

use super::queries::RawColumn;

/// Translate a Postgres type name (`pg_type.typname`) into the column-type
/// family used for rule derivation. Unknown names pass through unchanged.
pub fn type_family(udt_name: &str) -> &str {
    match udt_name {
        "int2" => "smallint",
        "int4" => "int",
        "int8" => "bigint",
        "float4" => "float",
        "float8" => "double",
        "bpchar" => "char",
        other => other,
    }
}

pub fn map_columns(raw: Vec<RawColumn>) -> Vec<ColumnDescriptor> {
    raw.into_iter()
        .map(|col| ColumnDescriptor {
            sql_type: type_family(&col.udt_name).to_string(),
            max_length: col
                .character_max_length
                .and_then(|length| u32::try_from(length).ok())
                .filter(|length| *length > 0),
            is_primary_key: col.is_primary_key,
            name: col.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_postgres_type_names_to_families() {
        assert_eq!(type_family("int2"), "smallint");
        assert_eq!(type_family("int4"), "int");
        assert_eq!(type_family("int8"), "bigint");
        assert_eq!(type_family("numeric"), "numeric");
        assert_eq!(type_family("float4"), "float");
        assert_eq!(type_family("float8"), "double");
        assert_eq!(type_family("varchar"), "varchar");
        assert_eq!(type_family("bpchar"), "char");
        assert_eq!(type_family("text"), "text");
        assert_eq!(type_family("timestamptz"), "timestamptz");
    }

    #[test]
    fn keeps_only_positive_lengths() {
        let mapped = map_columns(vec![
            RawColumn {
                name: "code".to_string(),
                udt_name: "bpchar".to_string(),
                character_max_length: Some(3),
                is_primary_key: true,
            },
            RawColumn {
                name: "note".to_string(),
                udt_name: "text".to_string(),
                character_max_length: None,
                is_primary_key: false,
            },
        ]);
        assert_eq!(
            mapped,
            vec![
                ColumnDescriptor::new("code", "char").with_max_length(3).primary(),
                ColumnDescriptor::new("note", "text"),
            ]
        );
    }
}
