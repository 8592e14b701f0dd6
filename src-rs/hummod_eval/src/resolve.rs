//! Resolution of named quantities within a module.
//!
//! A name is resolved fresh on every request; the only state consulted besides
//! the compiled model is the module's overrides. Rules are tried in order and
//! the first that applies wins:
//!
//! 1. an override for the name
//! 2. a `Module.Name` reference, resolved in the other module
//! 3. a variable with a literal value
//! 4. a variable without a value that shares its name with a function, applied
//!    to the arguments of the first call to that function in the definitions
//! 5. a definition, evaluated as a block or an expression
//! 6. a bare function, returned as is
//!
//! Anything else has no value.

use hummod_ir::{
    CallExpression, DefinitionBlock, DefinitionNode, FunctionSpec, ParsedModel, QualifiedName,
};
use hummod_parser::parse_call_expression;
use tracing::trace;

use crate::{
    client::Client,
    curve,
    error::EvalError,
    loader::ModuleLoader,
    value::{Literal, Value},
};

/// Returns the value of `name` in the module at `index`.
pub fn get<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    name: &str,
) -> Result<Value, EvalError> {
    client.enter(index, name)?;
    let result = get_unguarded(client, index, name);
    client.leave();
    result
}

fn get_unguarded<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    name: &str,
) -> Result<Value, EvalError> {
    let module = client.module_at(index);
    trace!(module = module.name(), name, "resolving");

    if let Some(literal) = module.overrides().get(name) {
        return Ok(literal.clone().into());
    }

    if is_reference(name) {
        let reference = QualifiedName::parse(name)?;
        return client.get_qualified(&reference);
    }

    let model = module.shared_model();
    resolve(client, index, &model, name)
}

fn resolve<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    model: &ParsedModel,
    name: &str,
) -> Result<Value, EvalError> {
    if let Some(variable) = model.variable(name) {
        if let Some(value) = variable.value() {
            return Ok(Literal::parse(value).into());
        }

        if let Some(function) = model.function(name) {
            if let Some(call) = find_call_site(model.definitions(), name) {
                let arguments = resolve_arguments(client, index, model, &call)?;
                return Ok(apply(function, &arguments));
            }
            trace!(name, "function-backed variable has no call site");
        }
    }

    if let Some(node) = model.definition(name) {
        return evaluate_node(client, index, model, node);
    }

    if let Some(function) = model.function(name) {
        return Ok(Value::Function(function.clone()));
    }

    Ok(Value::NoValue)
}

/// Finds the first call to `function` in the definitions, depth first.
fn find_call_site(definitions: &DefinitionBlock, function: &str) -> Option<CallExpression> {
    definitions
        .expressions()
        .into_iter()
        .filter_map(|(_, expression)| parse_call_expression(expression))
        .find(|call| call.callee() == function)
}

fn evaluate_node<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    model: &ParsedModel,
    node: &DefinitionNode,
) -> Result<Value, EvalError> {
    match node {
        DefinitionNode::Expression(expression) => {
            evaluate_expression(client, index, model, expression)
        }
        DefinitionNode::Block(block) => evaluate_block(client, index, model, block),
    }
}

/// Applies a call to a function of this module. Any other expression is
/// returned as text.
fn evaluate_expression<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    model: &ParsedModel,
    expression: &str,
) -> Result<Value, EvalError> {
    if let Some(call) = parse_call_expression(expression)
        && let Some(function) = model.function(call.callee())
    {
        let arguments = resolve_arguments(client, index, model, &call)?;
        return Ok(apply(function, &arguments));
    }

    Ok(Value::Text(expression.to_string()))
}

/// Executes the block's calls in order, then evaluates its entries.
///
/// Returns the last numeric entry, or the last entry if none is numeric. A
/// block without entries returns [`Value::Executed`].
fn evaluate_block<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    model: &ParsedModel,
    block: &DefinitionBlock,
) -> Result<Value, EvalError> {
    for call in block.calls() {
        let target = QualifiedName::parse(call)?;
        trace!(caller = client.module_at(index).name(), call = %target, "executing call");
        client.record_call(target.clone());
        client.get_qualified(&target)?;
    }

    let mut last = None;
    let mut last_number = None;
    for node in block.entries().values() {
        let value = evaluate_node(client, index, model, node)?;
        if value.as_number().is_some() {
            last_number = Some(value.clone());
        }
        last = Some(value);
    }

    Ok(last_number.or(last).unwrap_or(Value::Executed))
}

fn resolve_arguments<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    model: &ParsedModel,
    call: &CallExpression,
) -> Result<Vec<Value>, EvalError> {
    call.arguments()
        .iter()
        .map(|argument| resolve_argument(client, index, model, argument))
        .collect()
}

/// Resolves one call argument: a number, a reference to another module, a
/// name declared in this module, or otherwise literal text.
fn resolve_argument<L: ModuleLoader>(
    client: &mut Client<L>,
    index: usize,
    model: &ParsedModel,
    argument: &str,
) -> Result<Value, EvalError> {
    if let Ok(number) = argument.parse() {
        return Ok(Value::Number(number));
    }

    if argument.contains('.') {
        let reference = QualifiedName::parse(argument)?;
        return client.get_qualified(&reference);
    }

    if model.declares(argument) {
        return get(client, index, argument);
    }

    Ok(Value::Text(argument.to_string()))
}

/// Applies a function to resolved arguments.
///
/// A curve reads its query point from the first argument, using `0.0` if it
/// is missing or not numeric. Unsupported functions evaluate to `0.0`.
fn apply(function: &FunctionSpec, arguments: &[Value]) -> Value {
    match function {
        FunctionSpec::Curve(curve) => {
            let x = arguments
                .first()
                .and_then(Value::coerce_number)
                .unwrap_or(0.0);
            Value::Number(curve::evaluate(curve, x))
        }
        FunctionSpec::Unsupported { kind, .. } => {
            trace!(kind, "unsupported function evaluates to 0");
            Value::Number(0.0)
        }
    }
}

/// Returns whether a requested name refers to another module.
fn is_reference(name: &str) -> bool {
    name.contains('.') && name.trim().parse::<f64>().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EvalConfig, loader::SourceMap, test};

    #[test]
    fn literal_variables() {
        let mut client = test::client();
        let mut heart = client.module("Heart").expect("should load");

        assert_eq!(heart.get("Rate").expect("should evaluate"), Value::Number(72.0));
        assert_eq!(
            heart.get("Label").expect("should evaluate"),
            Value::Text("left ventricle".to_string())
        );
    }

    #[test]
    fn literal_independent_of_evaluation_order() {
        let mut client = test::client();
        let mut circulation = client.module("Circulation").expect("should load");
        let before = circulation.get("Base").expect("should evaluate");

        for name in ["Tone", "Resistance", "Beat", "Pressure"] {
            circulation.get(name).expect("should evaluate");
        }

        assert_eq!(circulation.get("Base").expect("should evaluate"), before);
        assert_eq!(before, Value::Number(2.0));
    }

    #[test]
    fn override_dominates_and_is_superseded() {
        let mut client = test::client();
        let mut heart = client.module("Heart").expect("should load");

        heart.set("Rate", 90.0);
        assert_eq!(heart.get("Rate").expect("should evaluate"), Value::Number(90.0));

        heart.set("Rate", "fast");
        assert_eq!(
            heart.get("Rate").expect("should evaluate"),
            Value::Text("fast".to_string())
        );

        heart.set("Pump", 1.0);
        assert_eq!(heart.get("Pump").expect("should evaluate"), Value::Number(1.0));

        assert_eq!(heart.clear_override("Rate"), Some(Literal::from("fast")));
        assert_eq!(heart.get("Rate").expect("should evaluate"), Value::Number(72.0));
        assert_eq!(heart.clear_override("Rate"), None);
    }

    #[test]
    fn valve_scenario() {
        let mut client = test::client();
        let mut valve = client.module("Valve").expect("should load");

        valve.set("Area", 0.0);
        assert_eq!(valve.get("Effect").expect("should evaluate"), Value::Number(1.0));

        valve.set("Area", 3.3);
        assert_eq!(valve.get("Effect").expect("should evaluate"), Value::Number(0.0));
    }

    #[test]
    fn curve_argument_defaults_to_zero() {
        let mut client = test::client();
        let mut valve = client.module("Valve").expect("should load");

        assert_eq!(valve.get("Area").expect("should evaluate"), Value::NoValue);
        assert_eq!(valve.get("Effect").expect("should evaluate"), Value::Number(1.0));

        valve.set("Area", "wide open");
        assert_eq!(valve.get("Effect").expect("should evaluate"), Value::Number(1.0));

        valve.set("Area", " 3.3 ");
        assert_eq!(valve.get("Effect").expect("should evaluate"), Value::Number(0.0));
    }

    #[test]
    fn definitions() {
        let mut client = test::client();
        let mut valve = client.module("Valve").expect("should load");
        valve.set("Area", 3.3);

        assert_eq!(
            valve.get("Flow").expect("should evaluate"),
            Value::Text("Conductance".to_string())
        );
        assert_eq!(valve.get("Parms").expect("should evaluate"), Value::Number(0.0));
        assert_eq!(valve.get("Opening").expect("should evaluate"), Value::Number(0.0));
        assert_eq!(valve.get("Missing").expect("should evaluate"), Value::NoValue);
    }

    #[test]
    fn bare_and_unsupported_functions() {
        let mut client = test::client();
        let mut valve = client.module("Valve").expect("should load");

        assert!(matches!(
            valve.get("Spare").expect("should evaluate"),
            Value::Function(FunctionSpec::Curve(_))
        ));
        assert_eq!(valve.get("Leak").expect("should evaluate"), Value::Number(0.0));
    }

    #[test]
    fn cross_module_matches_direct_access() {
        let mut client = test::client();

        let via_reference = client
            .module("Circulation")
            .expect("should load")
            .get("Heart.Rate")
            .expect("should evaluate");
        let direct = client
            .module("Heart")
            .expect("should load")
            .get("Rate")
            .expect("should evaluate");
        assert_eq!(via_reference, direct);

        client.module("Heart").expect("should load").set("Rate", 40.0);
        let resistance = client
            .module("Circulation")
            .expect("should load")
            .get("Resistance")
            .expect("should evaluate");
        let curve = match client
            .module("Circulation")
            .expect("should load")
            .model()
            .function("Resistance")
        {
            Some(FunctionSpec::Curve(curve)) => *curve,
            other => panic!("expected a curve, got {other:?}"),
        };
        assert_eq!(resistance, Value::Number(curve::evaluate(&curve, 40.0)));
    }

    #[test]
    fn block_with_only_calls() {
        let mut client = test::client();

        let beat = client
            .get_variable("Circulation.Beat")
            .expect("should evaluate");

        assert_eq!(beat, Value::Executed);
        assert_eq!(
            client.call_log(),
            [
                QualifiedName::new("Heart", "Pump"),
                QualifiedName::new("Lungs", "Ventilate"),
                QualifiedName::new("Lungs", "Inhale"),
            ]
        );
        assert!(client.is_loaded("Heart"));
        assert!(client.is_loaded("Lungs"));
    }

    #[test]
    fn block_with_calls_and_entries() {
        let mut client = test::client();

        let tone = client
            .get_variable("Circulation.Tone")
            .expect("should evaluate");
        let resistance = client
            .get_variable("Circulation.Resistance")
            .expect("should evaluate");

        assert_eq!(tone, resistance);
        assert!(tone.as_number().is_some());
        assert_eq!(client.call_log(), [QualifiedName::new("Heart", "Pump")]);
    }

    #[test]
    fn bad_call_reference() {
        let mut client = test::client();
        let error = client
            .get_variable("Circulation.Broken")
            .expect_err("should fail");

        assert!(matches!(error, EvalError::BadReference(ref r) if r.reference() == "Heart"));

        let mut circulation = client.module("Circulation").expect("should load");
        assert!(matches!(
            circulation.get("Heart.Rate.Now"),
            Err(EvalError::BadReference(_))
        ));
        assert_eq!(circulation.get("2.5").expect("should evaluate"), Value::NoValue);
    }

    #[test]
    fn recursion_limit() {
        let sources = SourceMap::new()
            .with_source("Ping", test::PING)
            .with_source("Pong", test::PONG);
        let mut client = Client::with_config(
            sources,
            EvalConfig::new().with_recursion_limit(Some(32)),
        );

        let error = client.get_variable("Ping.Echo").expect_err("should fail");
        assert!(matches!(
            error,
            EvalError::RecursionLimitExceeded { limit: 32, .. }
        ));

        assert_eq!(
            client.get_variable("Ping.Gain").expect("should evaluate"),
            Value::Number(1.0)
        );

        client.module("Pong").expect("should load").set("Echo", 0.0);
        assert_eq!(
            client.get_variable("Ping.Echo").expect("should evaluate"),
            Value::Number(1.0)
        );
    }

    #[test]
    fn called_block_runs_its_own_calls() {
        let mut client = test::client();

        let ventilate = client
            .get_variable("Lungs.Ventilate")
            .expect("should evaluate");

        assert_eq!(ventilate, Value::Text("Tidal".to_string()));
        assert_eq!(client.call_log(), [QualifiedName::new("Lungs", "Inhale")]);
    }

    #[test]
    fn call_target_failure_aborts_block() {
        let sources = SourceMap::new().with_source(
            "Reflex",
            "<structure><name>Reflex</name>
              <definitions>
                <block><name>Startle</name>
                  <call>Reflex.Twitch</call>
                  <call>Reflex.Blink</call>
                  <def><name>Done</name><val>1</val></def>
                </block>
                <block><name>Twitch</name>
                  <call>Spine.Arc</call>
                </block>
                <def><name>Blink</name><val>1</val></def>
              </definitions>
            </structure>",
        );
        let mut client = Client::new(sources);

        let error = client
            .get_variable("Reflex.Startle")
            .expect_err("should fail");

        assert!(matches!(error, EvalError::Load { ref module, .. } if module == "Spine"));
        assert_eq!(
            client.call_log(),
            [
                QualifiedName::new("Reflex", "Twitch"),
                QualifiedName::new("Spine", "Arc"),
            ]
        );
    }

    #[test]
    fn default_recursion_limit_fails_before_the_stack_runs_out() {
        let sources = SourceMap::new()
            .with_source("Ping", test::PING)
            .with_source("Pong", test::PONG);
        let mut client = Client::with_config(sources, EvalConfig::default());

        let error = client.get_variable("Ping.Echo").expect_err("should fail");
        assert!(matches!(
            error,
            EvalError::RecursionLimitExceeded { limit, .. }
                if limit == EvalConfig::DEFAULT_RECURSION_LIMIT
        ));
    }

    #[test]
    fn reference_detection() {
        assert!(is_reference("Heart.Rate"));
        assert!(is_reference("Heart."));
        assert!(!is_reference("Rate"));
        assert!(!is_reference("2.5"));
        assert!(!is_reference("-0.5e3"));
    }
}
