use std::collections::HashSet;

use super::*;
use crate::test_utils::all_event_kinds;

fn render(event: &Event<'_>) -> String {
    event.line().to_string()
}

#[test]
fn test_every_kind_has_a_unique_name() {
    let events = all_event_kinds();
    let names: HashSet<&str> = events.iter().map(Event::name).collect();
    assert_eq!(names.len(), events.len());
}

#[test]
fn test_names_follow_callback_convention() {
    for event in all_event_kinds() {
        let name = event.name();
        assert!(
            name.starts_with("On") || name.starts_with("Begin") || name.starts_with("End"),
            "{}",
            name
        );
    }
}

#[test]
fn test_silent_set_is_raw_opcode_routing() {
    let silent: Vec<&str> = all_event_kinds()
        .iter()
        .filter(|e| e.is_silent())
        .map(Event::name)
        .collect();
    assert_eq!(silent.len(), 13);
    assert!(silent.contains(&"OnEndFunc"));
    for name in silent.iter().filter(|n| **n != "OnEndFunc") {
        assert!(name.starts_with("OnOpcode"), "{}", name);
    }
}

#[test]
fn test_begin_and_end_events_pair_up() {
    let events = all_event_kinds();
    let begins = events.iter().filter(|e| e.shape() == Shape::Begin).count();
    let ends = events.iter().filter(|e| e.shape() == Shape::End).count();
    assert_eq!(begins, 26);
    assert_eq!(begins, ends);

    // Every begin name has a matching end name
    for event in events.iter().filter(|e| e.shape() == Shape::Begin) {
        let suffix = &event.name()["Begin".len()..];
        let end = format!("End{}", suffix);
        assert!(
            events.iter().any(|e| e.shape() == Shape::End && e.name() == end),
            "no {} for {}",
            end,
            event.name()
        );
    }
}

#[test]
fn test_shape_follows_name_prefix() {
    for event in all_event_kinds() {
        let name = event.name();
        let expected = if event.is_silent() {
            Shape::Silent
        } else if name.starts_with("Begin") {
            Shape::Begin
        } else if name.starts_with("End") {
            Shape::End
        } else {
            Shape::Leaf
        };
        assert_eq!(event.shape(), expected, "{}", name);
    }
}

#[test]
fn test_instruction_end_is_a_leaf() {
    // `end` inside a body closes a block, not a trace region
    assert_eq!(Event::End.shape(), Shape::Leaf);
    assert_eq!(Event::Else.shape(), Shape::Leaf);
    assert_eq!(Event::Block { sig: Type::Void }.shape(), Shape::Leaf);
}

#[test]
fn test_events_without_arguments_render_bare() {
    assert_eq!(render(&Event::Nop), "OnNopExpr");
    assert_eq!(render(&Event::EndTypeSection), "EndTypeSection");
    assert_eq!(render(&Event::EndModule), "EndModule");
    assert_eq!(render(&Event::CatchAll), "OnCatchAllExpr");
}

#[test]
fn test_section_and_item_lines() {
    assert_eq!(render(&Event::BeginModule { version: 1 }), "BeginModule(version: 1)");
    assert_eq!(
        render(&Event::BeginTypeSection { size: 12 }),
        "BeginTypeSection(size: 12)"
    );
    assert_eq!(
        render(&Event::Type { index: 0, params: &[], results: &[Type::I32] }),
        "OnType(index: 0, params: [], results: [i32])"
    );
    assert_eq!(render(&Event::TypeCount { count: 1 }), "OnTypeCount(count: 1)");
    assert_eq!(
        render(&Event::EndFunctionBody { index: 3 }),
        "EndFunctionBody(index: 3)"
    );
}

#[test]
fn test_limits_render_inline() {
    let limits = Limits::new(1).with_max(2);
    assert_eq!(
        render(&Event::Table { index: 0, elem_type: Type::FuncRef, limits }),
        "OnTable(index: 0, elem_type: funcref, initial: 1, max: 2)"
    );
    assert_eq!(
        render(&Event::ImportMemory {
            import_index: 1,
            module: "env",
            field: "memory",
            memory_index: 0,
            limits: Limits::new(16),
        }),
        "OnImportMemory(import_index: 1, memory_index: 0, initial: 16)"
    );
}

#[test]
fn test_import_names_are_quoted() {
    assert_eq!(
        render(&Event::Import { index: 0, module: "env", field: "draw\"rect" }),
        "OnImport(index: 0, module: \"env\", field: \"draw\\\"rect\")"
    );
    assert_eq!(
        render(&Event::Export {
            index: 0,
            kind: ExternalKind::Func,
            item_index: 2,
            name: "update",
        }),
        "OnExport(index: 0, kind: func, item_index: 2, name: \"update\")"
    );
}

#[test]
fn test_constant_lines() {
    assert_eq!(render(&Event::I32Const { value: 42 }), "OnI32ConstExpr(value: 42 (0x2a))");
    assert_eq!(
        render(&Event::I32Const { value: u32::MAX }),
        "OnI32ConstExpr(value: 4294967295 (0xffffffff))"
    );
    assert_eq!(
        render(&Event::F32Const { bits: 0x3fc0_0000 }),
        "OnF32ConstExpr(value: 1.5 (0x3fc00000))"
    );
    assert_eq!(
        render(&Event::F64Const { bits: 0x7ff8_0000_0000_0001 }),
        "OnF64ConstExpr(value: NaN (0x7ff8000000000001))"
    );
    assert_eq!(
        render(&Event::V128Const { value: V128::from_lanes([1, 2, 3, 4]) }),
        "OnV128ConstExpr(value: 0x00000001 0x00000002 0x00000003 0x00000004)"
    );
}

#[test]
fn test_init_expr_lines() {
    assert_eq!(
        render(&Event::InitExprI32Const { index: 0, value: 7 }),
        "OnInitExprI32ConstExpr(index: 0, value: 7)"
    );
    assert_eq!(
        render(&Event::InitExprRefNull { index: 1, ty: Type::ExternRef }),
        "OnInitExprRefNullExpr(index: 1, type: externref)"
    );
}

#[test]
fn test_br_table_line() {
    assert_eq!(
        render(&Event::BrTable { targets: &[0, 1], default_target: 2 }),
        "OnBrTableExpr(num_targets: 2, depths: [0, 1], default: 2)"
    );
    assert_eq!(
        render(&Event::BrTable { targets: &[], default_target: 0 }),
        "OnBrTableExpr(num_targets: 0, depths: [], default: 0)"
    );
}

#[test]
fn test_memory_access_line() {
    let load = Opcode::new("i32.load", 0x28);
    assert_eq!(
        render(&Event::Load { opcode: load, align_log2: 2, offset: 8 }),
        "OnLoadExpr(opcode: \"i32.load\" (40), align_log2: 2, offset: 8)"
    );
}

#[test]
fn test_block_signature_line() {
    assert_eq!(render(&Event::Block { sig: Type::Void }), "OnBlockExpr(sig: void)");
    assert_eq!(
        render(&Event::If { sig: Type::FuncIndex(4) }),
        "OnIfExpr(sig: funcidx[4])"
    );
}

#[test]
fn test_reloc_addend_is_signed() {
    assert_eq!(
        render(&Event::Reloc {
            ty: RelocType::MemoryAddrSleb,
            offset: 4,
            index: 0,
            addend: 0xffff_fffc,
        }),
        "OnReloc(type: R_WASM_MEMORY_ADDR_SLEB, offset: 4, index: 0, addend: -4)"
    );
}

#[test]
fn test_symbol_flags_are_hex() {
    assert_eq!(
        render(&Event::Symbol { index: 0, ty: SymbolType::Function, flags: 0x10 }),
        "OnSymbol(index: 0, type: func, flags: 0x10)"
    );
}

#[test]
fn test_data_segment_renders_size_not_bytes() {
    assert_eq!(
        render(&Event::DataSegmentData { index: 0, data: b"hello" }),
        "OnDataSegmentData(index: 0, size: 5)"
    );
}

#[test]
fn test_every_line_starts_with_its_name() {
    for event in all_event_kinds() {
        let line = render(&event);
        assert!(line.starts_with(event.name()), "{}", line);
        assert!(!line.contains('\n'), "{}", line);
        let rest = &line[event.name().len()..];
        assert!(rest.is_empty() || (rest.starts_with('(') && rest.ends_with(')')), "{}", line);
    }
}
