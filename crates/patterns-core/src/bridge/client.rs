//! Bridge client routine.

use std::rc::Rc;

use tracing::debug;

use crate::output::{Entry, Sink};

use super::abstraction::{Abstraction, BaseAbstraction, ExtendedAbstraction};
use super::implementor::{ConcreteImplementationA, ConcreteImplementationB, Implementor};

/// Emit the result of `abstraction.operation()`.
///
/// Apart from the setup that links an abstraction to an implementor, client
/// code only ever sees the [`Abstraction`] interface.
pub fn client_code(abstraction: &dyn Abstraction, sink: &dyn Sink) {
    debug!(
        abstraction = %abstraction.kind(),
        implementor = abstraction.implementor().name(),
        "bridge operation"
    );
    sink.emit(Entry::text(abstraction.operation()));
}

/// The classic walkthrough: the base abstraction on platform A, then the
/// extended abstraction on platform B.
pub fn run_demo(sink: &dyn Sink) {
    let implementor: Rc<dyn Implementor> = Rc::new(ConcreteImplementationA);
    let abstraction = BaseAbstraction::new(implementor);
    client_code(&abstraction, sink);
    sink.emit(Entry::blank());

    let implementor: Rc<dyn Implementor> = Rc::new(ConcreteImplementationB);
    let abstraction = ExtendedAbstraction::new(implementor);
    client_code(&abstraction, sink);
}
