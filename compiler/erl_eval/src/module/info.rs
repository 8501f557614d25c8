//! `module_info/0` and `module_info/1`.

use erl_ir::{FunctionRef, Name};
use erl_value::{invalid_module_info_call, no_matching_tuple_item, EvalResult, Value};

/// The introspection answers of one module, built once at construction.
#[derive(Clone, Debug)]
pub struct ModuleInfo {
    /// `[{exports, E}, {imports, []}, {attributes, []}, {compile, []}]`
    info: Value,
    /// Every function plus the two `module_info` entries.
    functions: Value,
}

impl ModuleInfo {
    /// `exports` and `functions` list declared functions in order; the
    /// `module_info/0,1` entries are appended to both.
    pub fn new(exports: &[FunctionRef], functions: &[FunctionRef]) -> Self {
        let info = Value::list(vec![
            entry("exports", function_list(exports)),
            entry("imports", Value::nil()),
            entry("attributes", Value::nil()),
            entry("compile", Value::nil()),
        ]);
        ModuleInfo {
            info,
            functions: function_list(functions),
        }
    }

    /// The `module_info/0` list.
    pub fn info(&self) -> &Value {
        &self.info
    }

    /// The `module_info(functions)` list.
    pub fn functions(&self) -> &Value {
        &self.functions
    }

    /// Answer `module_info(args...)`.
    pub fn query(&self, args: &[Value]) -> EvalResult {
        match args {
            [] => Ok(self.info.clone()),
            [Value::Atom(key)] if key.as_str() == "functions" => Ok(self.functions.clone()),
            [Value::Atom(key)] => self.lookup(*key).ok_or_else(no_matching_tuple_item),
            _ => Err(invalid_module_info_call()),
        }
    }

    fn lookup(&self, key: Name) -> Option<Value> {
        let entries = self.info.as_list()?;
        entries.iter().find_map(|item| match item.as_tuple() {
            Some([Value::Atom(name), value]) if *name == key => Some(value.clone()),
            _ => None,
        })
    }
}

fn entry(key: &str, value: Value) -> Value {
    Value::tuple(vec![Value::atom(key), value])
}

fn function_list(refs: &[FunctionRef]) -> Value {
    let module_info = [0, 1].map(|arity| FunctionRef {
        name: Name::MODULE_INFO,
        arity,
    });
    Value::list(
        refs.iter()
            .chain(&module_info)
            .map(|f| Value::tuple(vec![Value::Atom(f.name), Value::int(f.arity)]))
            .collect(),
    )
}
