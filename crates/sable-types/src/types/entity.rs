//! Type entities: the header shared by every declared type plus one payload
//! per variant.
//!
//! The category in the header is fixed at construction and always agrees
//! with the payload. [`TypeArena`](crate::types::TypeArena) constructors
//! reject mismatched pairs, so matching on [`TypeKind`] is the only
//! downcast the crate needs.

use crate::context::TableId;
use crate::types::TypeId;
use bitflags::bitflags;
use sable_mem::Symbol;
use std::fmt;

/// What kind of declaration an entity stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// No category (placeholder entities).
    None,
    /// A class.
    Class,
    /// The class of a class.
    Metaclass,
    /// A trait composed into classes.
    Trait,
    /// A function, closure, or bare signature.
    Function,
    /// A field of a behavior.
    Field,
    /// A method of a behavior.
    Method,
    /// A generic placeholder parameter.
    Formal,
    /// A generic instantiation.
    Generic,
    /// A type alias.
    Alias,
    /// The void type.
    Void,
}

impl Category {
    /// Returns true for the categories carried by [`Behavior`] payloads.
    #[must_use]
    pub const fn is_behavior(self) -> bool {
        matches!(self, Category::Class | Category::Metaclass | Category::Trait)
    }

    /// Returns true for categories without a payload.
    #[must_use]
    pub const fn is_basic(self) -> bool {
        matches!(self, Category::None | Category::Formal | Category::Void)
    }

    /// Returns the lower-case keyword used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::None => "none",
            Category::Class => "class",
            Category::Metaclass => "metaclass",
            Category::Trait => "trait",
            Category::Function => "function",
            Category::Field => "field",
            Category::Method => "method",
            Category::Formal => "formal",
            Category::Generic => "generic",
            Category::Alias => "typealias",
            Category::Void => "void",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Scope-local sequence number; -1 for anonymous and temporary entities.
    pub id: i32,
    /// Fixed at construction.
    pub category: Category,
    /// Name as written at the declaration site.
    pub short_name: Symbol,
    /// Qualified name. Equal to `short_name` outside behaviors.
    pub full_name: Symbol,
}

impl Header {
    /// Header of a non-behavior entity, whose short and full names agree.
    #[must_use]
    pub const fn named(id: i32, category: Category, name: Symbol) -> Self {
        Self {
            id,
            category,
            short_name: name,
            full_name: name,
        }
    }
}

bitflags! {
    /// Attributes of a callable signature.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CallableFlags: u8 {
        /// Declared `async`.
        const ASYNC = 1 << 0;
        /// Declared on the metaclass.
        const CLASS_METHOD = 1 << 1;
        /// Has formal type parameters.
        const GENERIC = 1 << 2;
        /// An initializer.
        const INITIALIZER = 1 << 3;
        /// Bound to an instance.
        const INSTANCE_METHOD = 1 << 4;
        /// An anonymous function.
        const LAMBDA = 1 << 5;
        /// Accepts a variable number of trailing arguments.
        const VARIADIC = 1 << 6;
        /// Declared as returning `void`.
        const VOID = 1 << 7;
    }
}

/// Class, metaclass, or trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behavior {
    /// Single superclass, if any.
    pub superclass: Option<TypeId>,
    /// Directly composed traits in declaration order. Never flattened.
    pub traits: Vec<TypeId>,
    /// Declared generic parameters.
    pub formals: Vec<TypeId>,
    /// Table of [`Field`] entities, table id -1.
    pub fields: TableId,
    /// Table of [`Method`] entities, table id equal to the behavior's id.
    pub methods: TableId,
}

/// Structural signature of a function, closure, or method.
///
/// `None` in the return or a parameter slot means dynamic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callable {
    /// Declared return type.
    pub return_type: Option<TypeId>,
    /// Parameter types in order.
    pub params: Vec<Option<TypeId>>,
    /// Declared generic parameters.
    pub formals: Vec<TypeId>,
    /// Signature attributes.
    pub flags: CallableFlags,
}

impl Callable {
    /// Creates a signature with no parameters and no attributes.
    #[must_use]
    pub fn new(return_type: Option<TypeId>) -> Self {
        Self {
            return_type,
            ..Self::default()
        }
    }

    /// Returns true if the signature takes trailing variadic arguments.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.flags.contains(CallableFlags::VARIADIC)
    }
}

/// A field slot of a behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Declared type; `None` means dynamic.
    pub declared_type: Option<TypeId>,
    /// Storage slot, always `id - 1`.
    pub index: i32,
    /// `var` rather than `val`.
    pub is_mutable: bool,
    /// Declared with an initializer expression.
    pub has_initializer: bool,
}

/// A method of a behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// The method's own signature.
    pub signature: Callable,
    /// Declared on the class rather than the instance.
    pub is_class: bool,
    /// An initializer.
    pub is_initializer: bool,
}

/// An instantiation of a raw behavior or callable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generic {
    /// The unparameterized type.
    pub raw_type: Option<TypeId>,
    /// Bound type arguments in order.
    pub actual_parameters: Vec<Option<TypeId>>,
    /// Set once every formal of the raw type is bound.
    pub is_fully_instantiated: bool,
}

/// A named indirection to another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    /// The aliased type.
    pub target: Option<TypeId>,
}

/// Variant payload of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Class, metaclass, or trait.
    Behavior(Behavior),
    /// Function signature.
    Callable(Callable),
    /// Field slot.
    Field(Field),
    /// Method with its signature.
    Method(Method),
    /// Generic instantiation.
    Generic(Generic),
    /// Type alias.
    Alias(Alias),
    /// Formal, void, or none: header only.
    Basic,
}

impl TypeKind {
    /// Returns true if `category` may head this payload.
    #[must_use]
    pub const fn accepts(&self, category: Category) -> bool {
        match self {
            TypeKind::Behavior(_) => category.is_behavior(),
            TypeKind::Callable(_) => matches!(category, Category::Function),
            TypeKind::Field(_) => matches!(category, Category::Field),
            TypeKind::Method(_) => matches!(category, Category::Method),
            TypeKind::Generic(_) => matches!(category, Category::Generic),
            TypeKind::Alias(_) => matches!(category, Category::Alias),
            TypeKind::Basic => category.is_basic(),
        }
    }
}

/// A declared type: header plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntity {
    header: Header,
    kind: TypeKind,
}

impl TypeEntity {
    /// Pairs a header with a payload.
    ///
    /// Returns `None` if the header's category cannot head the payload.
    #[must_use]
    pub fn new(header: Header, kind: TypeKind) -> Option<Self> {
        kind.accepts(header.category).then_some(Self { header, kind })
    }

    /// Returns the shared header.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the scope-local id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.header.id
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.header.category
    }

    /// Returns the declaration-site name.
    #[must_use]
    pub const fn short_name(&self) -> Symbol {
        self.header.short_name
    }

    /// Returns the qualified name.
    #[must_use]
    pub const fn full_name(&self) -> Symbol {
        self.header.full_name
    }

    /// Returns the payload.
    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns the payload mutably. The variant cannot be replaced through
    /// this, only its contents edited.
    pub fn kind_mut(&mut self) -> KindMut<'_> {
        match &mut self.kind {
            TypeKind::Behavior(b) => KindMut::Behavior(b),
            TypeKind::Callable(c) => KindMut::Callable(c),
            TypeKind::Field(f) => KindMut::Field(f),
            TypeKind::Method(m) => KindMut::Method(m),
            TypeKind::Generic(g) => KindMut::Generic(g),
            TypeKind::Alias(a) => KindMut::Alias(a),
            TypeKind::Basic => KindMut::Basic,
        }
    }

    /// Returns true for classes, metaclasses, and traits.
    #[must_use]
    pub const fn is_behavior(&self) -> bool {
        matches!(self.kind, TypeKind::Behavior(_))
    }

    /// Returns true for generic placeholders.
    #[must_use]
    pub const fn is_formal(&self) -> bool {
        matches!(self.header.category, Category::Formal)
    }

    /// Returns true for the kinds that are routinely built as unregistered
    /// temporaries (callables and generics).
    #[must_use]
    pub const fn is_temporary_kind(&self) -> bool {
        matches!(self.kind, TypeKind::Callable(_) | TypeKind::Generic(_))
    }

    /// Returns the behavior payload, if any.
    #[must_use]
    pub const fn as_behavior(&self) -> Option<&Behavior> {
        match &self.kind {
            TypeKind::Behavior(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the callable payload, if any.
    #[must_use]
    pub const fn as_callable(&self) -> Option<&Callable> {
        match &self.kind {
            TypeKind::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the signature of a callable or of a method.
    #[must_use]
    pub const fn signature(&self) -> Option<&Callable> {
        match &self.kind {
            TypeKind::Callable(c) => Some(c),
            TypeKind::Method(m) => Some(&m.signature),
            _ => None,
        }
    }

    /// Returns the field payload, if any.
    #[must_use]
    pub const fn as_field(&self) -> Option<&Field> {
        match &self.kind {
            TypeKind::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the method payload, if any.
    #[must_use]
    pub const fn as_method(&self) -> Option<&Method> {
        match &self.kind {
            TypeKind::Method(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the generic payload, if any.
    #[must_use]
    pub const fn as_generic(&self) -> Option<&Generic> {
        match &self.kind {
            TypeKind::Generic(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the alias payload, if any.
    #[must_use]
    pub const fn as_alias(&self) -> Option<&Alias> {
        match &self.kind {
            TypeKind::Alias(a) => Some(a),
            _ => None,
        }
    }
}

/// Mutable view of a payload returned by [`TypeEntity::kind_mut`].
#[derive(Debug)]
pub enum KindMut<'a> {
    /// Class, metaclass, or trait.
    Behavior(&'a mut Behavior),
    /// Function signature.
    Callable(&'a mut Callable),
    /// Field slot.
    Field(&'a mut Field),
    /// Method with its signature.
    Method(&'a mut Method),
    /// Generic instantiation.
    Generic(&'a mut Generic),
    /// Type alias.
    Alias(&'a mut Alias),
    /// Header only.
    Basic,
}
