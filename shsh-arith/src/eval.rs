use crate::ast::{AssignOp, BinaryOp, Expr, UnaryOp};
use crate::error::ArithError;

/// The evaluator's view of the shell environment: read the current (string)
/// value of a variable, and write a new (string) value back. Kept as a
/// trait rather than a concrete type so this crate does not depend on
/// `shsh-env`; `shsh-semantics` implements it over the real variable table.
pub trait Variables {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: String);
}

/// Coerces a shell variable's string value to an integer per §4.3: trimmed
/// decimal parse, falling back to 0 on failure (including unset variables).
pub fn coerce(value: Option<&str>) -> i64 {
    match value {
        None => 0,
        Some(s) => s.trim().parse::<i64>().unwrap_or(0),
    }
}

pub fn eval(expr: &str, vars: &mut impl Variables) -> Result<i64, ArithError> {
    let ast = crate::parser::parse(expr)?;
    eval_expr(&ast, vars)
}

fn eval_expr(expr: &Expr, vars: &mut impl Variables) -> Result<i64, ArithError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Variable(name) => Ok(coerce(vars.get(name).as_deref())),
        Expr::Unary(op, inner) => {
            let v = eval_expr(inner, vars)?;
            Ok(match op {
                UnaryOp::Neg => -v,
                UnaryOp::Pos => v,
                UnaryOp::Not => (v == 0) as i64,
                UnaryOp::BitNot => !v,
            })
        }
        Expr::Binary(BinaryOp::And, lhs, rhs) => {
            let l = eval_expr(lhs, vars)?;
            if l == 0 {
                return Ok(0);
            }
            Ok((eval_expr(rhs, vars)? != 0) as i64)
        }
        Expr::Binary(BinaryOp::Or, lhs, rhs) => {
            let l = eval_expr(lhs, vars)?;
            if l != 0 {
                return Ok(1);
            }
            Ok((eval_expr(rhs, vars)? != 0) as i64)
        }
        Expr::Binary(BinaryOp::Comma, lhs, rhs) => {
            eval_expr(lhs, vars)?;
            eval_expr(rhs, vars)
        }
        Expr::Binary(op, lhs, rhs) => {
            let l = eval_expr(lhs, vars)?;
            let r = eval_expr(rhs, vars)?;
            eval_binary(*op, l, r)
        }
        Expr::Ternary(cond, then_b, else_b) => {
            if eval_expr(cond, vars)? != 0 {
                eval_expr(then_b, vars)
            } else {
                eval_expr(else_b, vars)
            }
        }
        Expr::Assign(op, name, rhs) => {
            let rhs_val = eval_expr(rhs, vars)?;
            let cur = coerce(vars.get(name).as_deref());
            let new_val = match op {
                AssignOp::Assign => rhs_val,
                AssignOp::Add => cur.wrapping_add(rhs_val),
                AssignOp::Sub => cur.wrapping_sub(rhs_val),
                AssignOp::Mul => cur.wrapping_mul(rhs_val),
                AssignOp::Div => checked_div(cur, rhs_val)?,
                AssignOp::Rem => checked_rem(cur, rhs_val)?,
                AssignOp::BitAnd => cur & rhs_val,
                AssignOp::BitOr => cur | rhs_val,
                AssignOp::BitXor => cur ^ rhs_val,
                AssignOp::Shl => cur.wrapping_shl(rhs_val as u32),
                AssignOp::Shr => cur.wrapping_shr(rhs_val as u32),
            };
            vars.set(name, new_val.to_string());
            Ok(new_val)
        }
        Expr::PreIncDec { name, increment } => {
            let cur = coerce(vars.get(name).as_deref());
            let new_val = if *increment { cur + 1 } else { cur - 1 };
            vars.set(name, new_val.to_string());
            Ok(new_val)
        }
        Expr::PostIncDec { name, increment } => {
            let cur = coerce(vars.get(name).as_deref());
            let new_val = if *increment { cur + 1 } else { cur - 1 };
            vars.set(name, new_val.to_string());
            Ok(cur)
        }
    }
}

fn checked_div(l: i64, r: i64) -> Result<i64, ArithError> {
    if r == 0 {
        return Err(ArithError::DivByZero);
    }
    Ok(l.wrapping_div(r))
}

fn checked_rem(l: i64, r: i64) -> Result<i64, ArithError> {
    if r == 0 {
        return Err(ArithError::ModByZero);
    }
    Ok(l.wrapping_rem(r))
}

fn eval_binary(op: BinaryOp, l: i64, r: i64) -> Result<i64, ArithError> {
    use BinaryOp::*;
    Ok(match op {
        Add => l.wrapping_add(r),
        Sub => l.wrapping_sub(r),
        Mul => l.wrapping_mul(r),
        Div => return checked_div(l, r),
        Rem => return checked_rem(l, r),
        Pow => pow(l, r),
        Eq => (l == r) as i64,
        Ne => (l != r) as i64,
        Lt => (l < r) as i64,
        Le => (l <= r) as i64,
        Gt => (l > r) as i64,
        Ge => (l >= r) as i64,
        BitAnd => l & r,
        BitOr => l | r,
        BitXor => l ^ r,
        Shl => l.wrapping_shl(r as u32),
        Shr => l.wrapping_shr(r as u32),
        And | Or | Comma => unreachable!("handled with short-circuit evaluation above"),
    })
}

/// `x**n` for `n < 0` returns 0, matching the de facto integer semantics
/// called out in §4.3.
fn pow(base: i64, exp: i64) -> i64 {
    if exp < 0 {
        return 0;
    }
    let mut result: i64 = 1;
    let mut b = base;
    let mut e = exp as u64;
    while e > 0 {
        if e & 1 == 1 {
            result = result.wrapping_mul(b);
        }
        b = b.wrapping_mul(b);
        e >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapVars(HashMap<String, String>);
    impl Variables for MapVars {
        fn get(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
        fn set(&mut self, name: &str, value: String) {
            self.0.insert(name.to_string(), value);
        }
    }

    fn vars() -> MapVars {
        MapVars(HashMap::new())
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(eval("1 + 2 * 3", &mut vars()).unwrap(), 7);
        assert_eq!(eval("(1 + 2) * 3", &mut vars()).unwrap(), 9);
        assert_eq!(eval("2 ** 3 ** 2", &mut vars()).unwrap(), 512);
    }

    #[test]
    fn div_by_zero_errors() {
        assert_eq!(eval("1/0", &mut vars()), Err(ArithError::DivByZero));
        assert_eq!(eval("1%0", &mut vars()), Err(ArithError::ModByZero));
    }

    #[test]
    fn negative_power_is_zero() {
        assert_eq!(eval("2 ** -1", &mut vars()).unwrap(), 0);
    }

    #[test]
    fn assignment_and_read_back() {
        let mut v = vars();
        assert_eq!(eval("x = 5", &mut v).unwrap(), 5);
        assert_eq!(eval("x += 3", &mut v).unwrap(), 8);
        assert_eq!(v.get("x").as_deref(), Some("8"));
    }

    #[test]
    fn pre_and_post_increment() {
        let mut v = vars();
        v.set("x", "5".into());
        assert_eq!(eval("x++", &mut v).unwrap(), 5);
        assert_eq!(v.get("x").as_deref(), Some("6"));
        assert_eq!(eval("++x", &mut v).unwrap(), 7);
    }

    #[test]
    fn ternary_and_comma() {
        assert_eq!(eval("1 ? 2 : 3", &mut vars()).unwrap(), 2);
        assert_eq!(eval("(1, 2, 3)", &mut vars()).unwrap(), 3);
    }

    #[test]
    fn unset_variable_coerces_to_zero() {
        assert_eq!(eval("unset_var + 1", &mut vars()).unwrap(), 1);
    }

    #[test]
    fn non_numeric_string_coerces_to_zero() {
        let mut v = vars();
        v.set("x", "abc".into());
        assert_eq!(eval("x + 1", &mut v).unwrap(), 1);
    }

    #[test]
    fn short_circuit_and_or_do_not_error() {
        // The right-hand side must not be evaluated for `&&`/`||`
        // short-circuiting, so a division by zero there must not surface.
        assert_eq!(eval("0 && 1/0", &mut vars()).unwrap(), 0);
        assert_eq!(eval("1 || 1/0", &mut vars()).unwrap(), 1);
    }
}
