//! Expression evaluator and update executor.
//!
//! [`eval_expr`] recursively evaluates an [`Expr`] tree to a `bool`, reading
//! signals from an [`Environment`] and entering user functions through fresh
//! call environments. [`eval_update`] evaluates an [`Update`]'s expression
//! and writes the result back into the environment.

use hwsim_ir::{Expr, Update};

use crate::env::Environment;
use crate::error::SimError;

/// Evaluates an expression against `env`.
///
/// Both operands of `*` and `+` are always evaluated, so a lookup failure on
/// either side is reported even when the other side decides the result.
pub fn eval_expr(env: &Environment, expr: &Expr) -> Result<bool, SimError> {
    match expr {
        Expr::Signal(name) => env.get_variable(name),

        Expr::And(lhs, rhs) => {
            let l = eval_expr(env, lhs)?;
            let r = eval_expr(env, rhs)?;
            Ok(l && r)
        }

        Expr::Or(lhs, rhs) => {
            let l = eval_expr(env, lhs)?;
            let r = eval_expr(env, rhs)?;
            Ok(l || r)
        }

        Expr::Not(operand) => Ok(!eval_expr(env, operand)?),

        Expr::Call { name, args } => eval_call(env, name, args),
    }
}

/// Evaluates a call to user function `name`.
///
/// Arguments are evaluated in the caller's environment, then bound to the
/// formal parameters in a new call environment in which the body runs.
fn eval_call(env: &Environment, name: &str, args: &[Expr]) -> Result<bool, SimError> {
    let def = env.get_def(name)?;
    if args.len() != def.arity() {
        return Err(SimError::ArityMismatch {
            function: name.to_string(),
            expected: def.arity(),
            found: args.len(),
        });
    }
    if env.depth() >= env.max_call_depth() {
        return Err(SimError::CallDepthExceeded {
            function: name.to_string(),
            limit: env.max_call_depth(),
        });
    }

    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval_expr(env, arg)?);
    }

    let mut call_env = Environment::for_call(env);
    for (param, value) in def.params.iter().zip(values) {
        call_env.set_variable(param.as_str(), value);
    }
    eval_expr(&call_env, &def.body)
}

/// Evaluates `update`'s expression and binds the result to its target.
pub fn eval_update(env: &mut Environment, update: &Update) -> Result<(), SimError> {
    let value = eval_expr(env, &update.expr)?;
    env.set_variable(update.target.as_str(), value);
    Ok(())
}
