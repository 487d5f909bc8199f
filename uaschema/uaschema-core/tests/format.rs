use uaschema_core::{PrimitiveKind, RecordSchema, SchemaArena, SchemaId, TypeName, format_schema};

fn point(arena: &mut SchemaArena) -> SchemaId {
    let double = arena.primitive(PrimitiveKind::Double);
    let string = arena.primitive(PrimitiveKind::String);
    let maybe = arena.nullable(double);
    let tags = arena.array(string);
    arena.record(
        RecordSchema::new(TypeName::new("Point", None))
            .with_field("X", double)
            .with_field("Y", maybe)
            .with_field("Tags", tags),
    )
}

#[test]
fn record_outline_lists_fields() -> Result<(), std::fmt::Error> {
    let mut arena = SchemaArena::new();
    let root = point(&mut arena);
    let text = format_schema(arena.view(root))?;
    let expected = "\
type: record
name: Point
nullable: false
fields:
    X: { type: double, nullable: false }
    Y: { type: double, nullable: true }
    Tags:
        type: array
        nullable: false
        item: { type: string, nullable: false }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn repeated_named_type_is_a_ref() -> Result<(), std::fmt::Error> {
    let mut arena = SchemaArena::new();
    let double = arena.primitive(PrimitiveKind::Double);
    let inner = arena.record(RecordSchema::new(TypeName::new("Point", None)).with_field("X", double));
    let maybe = arena.nullable(inner);
    let line = arena.record(
        RecordSchema::new(TypeName::new("Line", None))
            .with_field("A", inner)
            .with_field("B", maybe),
    );
    let text = format_schema(arena.view(line))?;
    let expected = "\
type: record
name: Line
nullable: false
fields:
    A:
        type: record
        name: Point
        nullable: false
        fields:
            X: { type: double, nullable: false }
    B: { ref: Point, nullable: true }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn leaf_root_prints_two_lines() -> Result<(), std::fmt::Error> {
    let mut arena = SchemaArena::new();
    let int = arena.primitive(PrimitiveKind::Int);
    let root = arena.nullable(int);
    assert_eq!(format_schema(arena.view(root))?, "type: int\nnullable: true\n");
    assert_eq!(arena.view(root).to_string(), "type: int\nnullable: true\n");
    Ok(())
}
