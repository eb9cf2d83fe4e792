#[cfg(test)]
mod tests {
    use jmmc_ctx::{Label, LabelKind};
    use jmmc_ir::ir_class::*;
    use jmmc_ir::ir_instr::*;
    use jmmc_ir::ir_operands::*;
    use jmmc_types::IrType;

    fn int_var(name: &str) -> Operand {
        Operand::new(name, IrType::I32)
    }

    fn this_of(class: &str) -> Operand {
        Operand::new("this", IrType::Class(class.to_string()))
    }

    #[test]
    fn test_assign_binary() {
        let instr = IRInstr::assign_var(
            int_var("x"),
            IRExpr::Binary {
                op: IRBinOp::Add,
                lhs: Element::Operand(int_var("x")),
                rhs: Element::int(1),
            },
        );
        assert_eq!(instr.to_string(), "x.i32 :=.i32 x.i32 +.i32 1.i32;");
    }

    #[test]
    fn test_comparison_and_not() {
        let lt = IRExpr::Binary {
            op: IRBinOp::Lt,
            lhs: Element::Operand(int_var("a")),
            rhs: Element::int(10),
        };
        let branch = IRInstr::CondBranch {
            cond: lt,
            target: Label::new(LabelKind::True, 0),
        };
        assert_eq!(branch.to_string(), "if(a.i32 <.bool 10.i32) goto true_0;");

        let not = IRExpr::Not(Element::var("b", IrType::Bool));
        assert_eq!(not.to_string(), "!.bool b.bool");
    }

    #[test]
    fn test_calls() {
        let call = CallExpr {
            kind: CallKind::Static,
            target: CallTarget::Class("io".to_string()),
            method: "println".to_string(),
            args: vec![Element::Operand(int_var("x"))],
            ret: IrType::Void,
        };
        assert_eq!(IRInstr::Call(call).to_string(), "invokestatic(io, \"println\", x.i32).V;");

        let call = CallExpr {
            kind: CallKind::Virtual,
            target: CallTarget::Object(this_of("Foo")),
            method: "bar".to_string(),
            args: vec![],
            ret: IrType::I32,
        };
        assert_eq!(IRExpr::Call(call).to_string(), "invokevirtual(this.Foo, \"bar\").i32");
    }

    #[test]
    fn test_fields() {
        let get = IRExpr::GetField {
            object: this_of("Foo"),
            field: int_var("n"),
        };
        assert_eq!(get.to_string(), "getfield(this, n.i32).i32");

        let put = IRInstr::PutField {
            object: this_of("Foo"),
            field: int_var("n"),
            value: Element::int(3),
        };
        assert_eq!(put.to_string(), "putfield(this, n.i32, 3.i32).V;");
    }

    #[test]
    fn test_arrays() {
        let arr_ty = IrType::array_of(IrType::I32);
        let new_arr = IRExpr::NewArray {
            size: Element::int(3),
            ty: arr_ty.clone(),
        };
        assert_eq!(new_arr.to_string(), "new(array, 3.i32).array.i32");

        let a = Operand::new("a", arr_ty);
        let len = IRExpr::ArrayLength(a.clone());
        assert_eq!(len.to_string(), "arraylength(a.array.i32).i32");

        let store = IRInstr::Assign {
            dest: Dest::Index(ArrayOperand::new(a, Element::Operand(int_var("i")))),
            ty: IrType::I32,
            rhs: IRExpr::Element(Element::int(7)),
        };
        assert_eq!(store.to_string(), "a[i.i32].i32 :=.i32 7.i32;");
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(IRInstr::Goto(Label::endif(2)).to_string(), "goto endif_2;");
        assert_eq!(IRInstr::Label(Label::new(LabelKind::If, 2)).to_string(), "if_2:");
        let ret = IRInstr::Return {
            ty: IrType::Void,
            value: None,
        };
        assert_eq!(ret.to_string(), "ret.V;");
        let ret = IRInstr::Return {
            ty: IrType::Bool,
            value: Some(Element::boolean(true)),
        };
        assert_eq!(ret.to_string(), "ret.bool 1.bool;");
    }

    #[test]
    fn test_class_layout() {
        let mut class = IRClass::new("Foo");
        class.super_name = Some("Bar".to_string());
        class.imports.push("java.util.List".to_string());
        class.fields.push(int_var("n"));

        let mut method = IRMethod::new("main", vec![Operand::new("args", IrType::array_of(IrType::String))], IrType::Void);
        method.is_static = true;
        method.body.push(IRInstr::Return {
            ty: IrType::Void,
            value: None,
        });
        class.methods.push(method);

        let expected = "import java.util.List;\n\
                        Foo extends Bar {\n\
                        \n\
                        .field public n.i32;\n\
                        \n\
                        .construct Foo().V {\n\
                        invokespecial(this, \"<init>\").V;\n\
                        }\n\
                        \n\
                        .method public static main(args.array.String).V {\n\
                        ret.V;\n\
                        }\n\
                        }\n";
        assert_eq!(class.to_string(), expected);
    }
}
