// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use jmmc_backend::{CodeGenerator, JasminGenerator};
    use jmmc_ctx::builder::CompilerCtxBuilder;
    use jmmc_ctx::{Label, LabelKind};
    use jmmc_errors::CompileError;
    use jmmc_ir::ir_class::{IRClass, IRMethod};
    use jmmc_ir::ir_instr::*;
    use jmmc_ir::ir_operands::*;
    use jmmc_types::IrType;

    const CLASS: &str = "Foo";

    fn class() -> IRClass {
        let mut class = IRClass::new(CLASS);
        class.imports = vec!["io".to_string(), "java.util.List".to_string()];
        class
    }

    fn int(name: &str) -> Operand {
        Operand::new(name, IrType::I32)
    }

    fn this() -> Operand {
        Operand::new("this", IrType::Class(CLASS.to_string()))
    }

    fn method(params: Vec<Operand>, ret: IrType, body: Vec<IRInstr>) -> IRMethod {
        let mut method = IRMethod::new("foo", params, ret);
        method.body = body;
        method
    }

    fn generator(iinc: bool) -> JasminGenerator {
        let ctx = CompilerCtxBuilder::new().iinc_peephole(iinc).build();
        JasminGenerator::new(Rc::new(RefCell::new(ctx)))
    }

    fn emit(method: &IRMethod) -> Result<String, CompileError> {
        JasminGenerator::default().gen_method(&class(), method)
    }

    /// Instruction lines without the header, limits and trailer.
    fn instrs(text: &str) -> Vec<String> {
        let lines: Vec<&str> = text.lines().collect();
        lines[3..lines.len() - 1]
            .iter()
            .map(|line| line.trim().to_string())
            .collect()
    }

    fn limit(text: &str, what: &str) -> usize {
        let prefix = format!(".limit {what} ");
        text.lines()
            .find_map(|line| line.trim().strip_prefix(&prefix))
            .unwrap()
            .parse()
            .unwrap()
    }

    fn store_literal(value: i32) -> Vec<String> {
        let body = vec![IRInstr::assign_var(int("x"), Element::int(value).into())];
        instrs(&emit(&method(vec![], IrType::Void, body)).unwrap())
    }

    #[test]
    fn test_whole_method_layout() {
        let body = vec![
            IRInstr::assign_var(int("x"), IRExpr::Binary {
                op: IRBinOp::Add,
                lhs: Element::var("a", IrType::I32),
                rhs: Element::var("b", IrType::I32),
            }),
            IRInstr::Return { ty: IrType::I32, value: Some(Element::var("x", IrType::I32)) },
        ];
        let text = emit(&method(vec![int("a"), int("b")], IrType::I32, body)).unwrap();
        assert_eq!(text, "\
.method public foo(II)I
   .limit stack 2
   .limit locals 4
   iload_1
   iload_2
   iadd
   istore_3
   iload_3
   ireturn
.end method
");
    }

    #[test]
    fn test_integer_constant_encodings() {
        let cases = [
            (-1, "iconst_m1"),
            (0, "iconst_0"),
            (5, "iconst_5"),
            (6, "bipush 6"),
            (-2, "bipush -2"),
            (127, "bipush 127"),
            (-128, "bipush -128"),
            (128, "sipush 128"),
            (-129, "sipush -129"),
            (32767, "sipush 32767"),
            (32768, "ldc 32768"),
            (-32769, "ldc -32769"),
        ];
        for (value, expected) in cases {
            assert_eq!(store_literal(value), vec![expected, "istore_1"], "value {value}");
        }
    }

    #[test]
    fn test_invalid_literal() {
        let lit = Literal { value: "abc".to_string(), ty: IrType::I32 };
        let body = vec![IRInstr::assign_var(int("x"), Element::Literal(lit).into())];
        let err = emit(&method(vec![], IrType::Void, body)).unwrap_err();
        assert_eq!(err, CompileError::InvalidLiteral("abc.i32".to_string()));
    }

    #[test]
    fn test_slot_forms() {
        let params = vec![int("a"), int("b"), int("c"), int("d")];
        let body = vec![IRInstr::Return { ty: IrType::I32, value: Some(Element::var("d", IrType::I32)) }];
        let text = emit(&method(params, IrType::I32, body)).unwrap();
        assert_eq!(instrs(&text), vec!["iload 4", "ireturn"]);
        assert_eq!(limit(&text, "locals"), 5);
    }

    #[test]
    fn test_explicit_register_table_is_used() {
        let mut m = method(vec![], IrType::Void, vec![
            IRInstr::assign_var(int("x"), Element::int(1).into()),
        ]);
        m.registers.insert("this", 0);
        m.registers.insert("x", 7);
        let text = emit(&m).unwrap();
        assert_eq!(instrs(&text), vec!["iconst_1", "istore 7"]);
        assert_eq!(limit(&text, "locals"), 8);
    }

    #[test]
    fn test_unknown_variable() {
        let mut m = method(vec![], IrType::Void, vec![
            IRInstr::assign_var(int("x"), Element::var("y", IrType::I32).into()),
        ]);
        m.registers.insert("x", 1);
        let err = emit(&m).unwrap_err();
        assert_eq!(err, CompileError::UnknownVariable {
            method: "foo".to_string(),
            name: "y".to_string(),
        });
    }

    #[test]
    fn test_increment_becomes_iinc() {
        let add = |lhs: Element, rhs: Element| IRInstr::assign_var(int("x"), IRExpr::Binary {
            op: IRBinOp::Add,
            lhs,
            rhs,
        });
        let body = vec![
            add(Element::var("x", IrType::I32), Element::int(1)),
            add(Element::int(-3), Element::var("x", IrType::I32)),
        ];
        let m = method(vec![int("x")], IrType::Void, body);
        let text = emit(&m).unwrap();
        assert_eq!(instrs(&text), vec!["iinc 1 1", "iinc 1 -3"]);
    }

    #[test]
    fn test_iinc_out_of_range_or_disabled() {
        let body = vec![IRInstr::assign_var(int("x"), IRExpr::Binary {
            op: IRBinOp::Add,
            lhs: Element::var("x", IrType::I32),
            rhs: Element::int(200),
        })];
        let m = method(vec![int("x")], IrType::Void, body);
        let expected = vec!["iload_1", "sipush 200", "iadd", "istore_1"];
        assert_eq!(instrs(&emit(&m).unwrap()), expected);

        let mut small = m.clone();
        if let IRInstr::Assign { rhs: IRExpr::Binary { rhs, .. }, .. } = &mut small.body[0] {
            *rhs = Element::int(1);
        }
        let text = generator(false).gen_method(&class(), &small).unwrap();
        assert_eq!(instrs(&text), vec!["iload_1", "iconst_1", "iadd", "istore_1"]);
    }

    #[test]
    fn test_call_stack_limit_and_unused_result() {
        let call = CallExpr {
            kind: CallKind::Virtual,
            target: CallTarget::Object(this()),
            method: "bar".to_string(),
            args: vec![Element::int(1), Element::int(2), Element::int(3)],
            ret: IrType::I32,
        };
        let body = vec![
            IRInstr::assign_var(int("t"), IRExpr::Call(call.clone())),
            IRInstr::Call(call),
        ];
        let text = emit(&method(vec![], IrType::Void, body)).unwrap();
        assert_eq!(instrs(&text), vec![
            "aload_0", "iconst_1", "iconst_2", "iconst_3", "invokevirtual Foo/bar(III)I", "istore_1",
            "aload_0", "iconst_1", "iconst_2", "iconst_3", "invokevirtual Foo/bar(III)I", "pop",
        ]);
        assert_eq!(limit(&text, "stack"), 4);
    }

    #[test]
    fn test_static_and_imported_calls() {
        let println = CallExpr {
            kind: CallKind::Static,
            target: CallTarget::Class("io".to_string()),
            method: "println".to_string(),
            args: vec![Element::var("a", IrType::I32)],
            ret: IrType::Void,
        };
        let list = Operand::new("l", IrType::Class("List".to_string()));
        let size = CallExpr {
            kind: CallKind::Virtual,
            target: CallTarget::Object(list.clone()),
            method: "size".to_string(),
            args: vec![],
            ret: IrType::I32,
        };
        let body = vec![
            IRInstr::Call(println),
            IRInstr::assign_var(int("n"), IRExpr::Call(size)),
            IRInstr::Return { ty: IrType::Void, value: None },
        ];
        let text = emit(&method(vec![int("a"), list], IrType::Void, body)).unwrap();
        assert!(text.starts_with(".method public foo(ILjava/util/List;)V\n"));
        assert_eq!(instrs(&text), vec![
            "iload_1",
            "invokestatic io/println(I)V",
            "aload_2",
            "invokevirtual java/util/List/size()I",
            "istore_3",
            "return",
        ]);
    }

    #[test]
    fn test_object_creation_and_fields() {
        let bar = Operand::new("t", IrType::Class("Bar".to_string()));
        let body = vec![
            IRInstr::assign_var(bar.clone(), IRExpr::New("Bar".to_string())),
            IRInstr::Call(CallExpr {
                kind: CallKind::Special,
                target: CallTarget::Object(bar),
                method: "<init>".to_string(),
                args: vec![],
                ret: IrType::Void,
            }),
            IRInstr::assign_var(int("v"), IRExpr::GetField { object: this(), field: int("n") }),
            IRInstr::PutField { object: this(), field: int("n"), value: Element::var("v", IrType::I32) },
        ];
        let text = emit(&method(vec![], IrType::Void, body)).unwrap();
        assert_eq!(instrs(&text), vec![
            "new Bar",
            "astore_1",
            "aload_1",
            "invokespecial Bar/<init>()V",
            "aload_0",
            "getfield Foo/n I",
            "istore_2",
            "aload_0",
            "iload_2",
            "putfield Foo/n I",
        ]);
        assert_eq!(limit(&text, "stack"), 2);
    }

    #[test]
    fn test_arrays() {
        let arr_ty = IrType::array_of(IrType::I32);
        let arr = Operand::new("a", arr_ty.clone());
        let slot = ArrayOperand::new(arr.clone(), Element::var("i", IrType::I32));
        let body = vec![
            IRInstr::assign_var(arr.clone(), IRExpr::NewArray { size: Element::int(10), ty: arr_ty.clone() }),
            IRInstr::Assign { dest: Dest::Index(slot.clone()), ty: IrType::I32, rhs: Element::int(5).into() },
            IRInstr::assign_var(int("v"), IRExpr::Index(slot)),
            IRInstr::assign_var(int("n"), IRExpr::ArrayLength(arr)),
        ];
        let text = emit(&method(vec![int("i")], IrType::Void, body)).unwrap();
        assert_eq!(instrs(&text), vec![
            "bipush 10", "newarray int", "astore_2",
            "aload_2", "iload_1", "iconst_5", "iastore",
            "aload_2", "iload_1", "iaload", "istore_3",
            "aload_2", "arraylength", "istore 4",
        ]);
        assert_eq!(limit(&text, "stack"), 3);
    }

    #[test]
    fn test_not() {
        let b = Operand::new("b", IrType::Bool);
        let body = vec![IRInstr::assign_var(
            Operand::new("t", IrType::Bool),
            IRExpr::Not(Element::Operand(b.clone())),
        )];
        let text = emit(&method(vec![b], IrType::Void, body)).unwrap();
        assert_eq!(instrs(&text), vec!["iload_1", "iconst_1", "ixor", "istore_2"]);
    }

    #[test]
    fn test_unsupported_shapes() {
        let lt = vec![IRInstr::assign_var(Operand::new("t", IrType::Bool), IRExpr::Binary {
            op: IRBinOp::Lt,
            lhs: Element::var("a", IrType::I32),
            rhs: Element::int(1),
        })];
        let err = emit(&method(vec![int("a")], IrType::Void, lt)).unwrap_err();
        assert!(matches!(err, CompileError::NotImplemented(_)));

        let bool_arr = IrType::array_of(IrType::Bool);
        let new_arr = vec![IRInstr::assign_var(
            Operand::new("t", bool_arr.clone()),
            IRExpr::NewArray { size: Element::int(1), ty: bool_arr },
        )];
        let err = emit(&method(vec![], IrType::Void, new_arr)).unwrap_err();
        assert!(matches!(err, CompileError::NotImplemented(_)));

        let and = vec![IRInstr::CondBranch {
            cond: IRExpr::Binary {
                op: IRBinOp::And,
                lhs: Element::boolean(true),
                rhs: Element::boolean(false),
            },
            target: Label::new(LabelKind::If, 0),
        }];
        let err = emit(&method(vec![], IrType::Void, and)).unwrap_err();
        assert!(matches!(err, CompileError::NotImplemented(_)));
    }

    #[test]
    fn test_branch_encodings() {
        let target = Label::new(LabelKind::True, 0);
        let branch = |op: IRBinOp, lhs: Element, rhs: Element| {
            let body = vec![
                IRInstr::CondBranch { cond: IRExpr::Binary { op, lhs, rhs }, target: target.clone() },
                IRInstr::Label(target.clone()),
            ];
            let text = emit(&method(vec![int("a"), int("b")], IrType::Void, body)).unwrap();
            instrs(&text)
        };
        let a = || Element::var("a", IrType::I32);
        let b = || Element::var("b", IrType::I32);

        assert_eq!(branch(IRBinOp::Lt, a(), Element::int(10)),
            vec!["iload_1", "bipush 10", "isub", "iflt true_0", "true_0:"]);
        assert_eq!(branch(IRBinOp::Gte, a(), Element::int(10)),
            vec!["iload_1", "bipush 10", "isub", "ifge true_0", "true_0:"]);
        assert_eq!(branch(IRBinOp::Lt, Element::int(10), a()),
            vec!["iload_1", "bipush 10", "isub", "ifgt true_0", "true_0:"]);
        assert_eq!(branch(IRBinOp::Gte, Element::int(10), a()),
            vec!["iload_1", "bipush 10", "isub", "ifle true_0", "true_0:"]);
        assert_eq!(branch(IRBinOp::Lt, a(), b()),
            vec!["iload_1", "iload_2", "if_icmplt true_0", "true_0:"]);
        assert_eq!(branch(IRBinOp::Gte, a(), b()),
            vec!["iload_1", "iload_2", "if_icmpge true_0", "true_0:"]);
    }

    #[test]
    fn test_labels_start_at_column_zero() {
        let cond = Operand::new("c", IrType::Bool);
        let end = Label::new(LabelKind::End, 0);
        let body = vec![
            IRInstr::CondBranch { cond: Element::Operand(cond.clone()).into(), target: end.clone() },
            IRInstr::Goto(end.clone()),
            IRInstr::Label(end),
        ];
        let text = emit(&method(vec![cond], IrType::Void, body)).unwrap();
        assert!(text.contains("\n   iload_1\n   ifne end_0\n   goto end_0\nend_0:\n"));
    }

    #[test]
    fn test_emission_is_idempotent() {
        let body = vec![
            IRInstr::assign_var(int("x"), Element::int(300).into()),
            IRInstr::Return { ty: IrType::I32, value: Some(Element::var("x", IrType::I32)) },
        ];
        let m = method(vec![], IrType::I32, body);
        let cg = JasminGenerator::default();
        assert_eq!(cg.gen_method(&class(), &m).unwrap(), cg.gen_method(&class(), &m).unwrap());
    }

    #[test]
    fn test_static_main_header() {
        let args = Operand::new("args", IrType::array_of(IrType::String));
        let mut m = IRMethod::new("main", vec![args], IrType::Void);
        m.is_static = true;
        m.body = vec![IRInstr::Return { ty: IrType::Void, value: None }];
        let text = emit(&m).unwrap();
        assert_eq!(text, "\
.method public static main([Ljava/lang/String;)V
   .limit stack 0
   .limit locals 2
   return
.end method
");
    }

    #[test]
    fn test_class_boilerplate() {
        let mut class = class();
        class.fields.push(int("n"));
        class.super_name = Some("List".to_string());
        let text = JasminGenerator::default().gen_class(&class).unwrap();
        assert_eq!(text, "\
.class public Foo
.super java/util/List

.field public n I

;default constructor
.method public <init>()V
   aload_0
   invokespecial java/util/List/<init>()V
   return
.end method
");
    }

    #[test]
    fn test_custom_indent() {
        let ctx = CompilerCtxBuilder::new().indent("\t").build();
        let cg = JasminGenerator::new(Rc::new(RefCell::new(ctx)));
        let m = method(vec![], IrType::Void, vec![IRInstr::Return { ty: IrType::Void, value: None }]);
        let text = cg.gen_method(&class(), &m).unwrap();
        assert!(text.contains("\n\treturn\n"));
    }
}
