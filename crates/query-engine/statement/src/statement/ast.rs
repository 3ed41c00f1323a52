//! Type definitions of a parsed SQL statement.
//!
//! Only the shapes relevant to building a search request are modelled;
//! everything else is kept as an opaque description so the translator
//! can report it.

use std::fmt;

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Box<Select>),
    Insert,
    Update,
    Delete,
    /// Any other statement kind, by name.
    Other(String),
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Vec<SelectItem>,
    pub from: Vec<TableName>,
    pub selection: Option<Expression>,
    pub group_by: Vec<GroupByKey>,
    pub order_by: Vec<OrderByElement>,
    pub limit: Limit,
}

/// An item of the select list. Aliases are dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `*` or `table.*`
    Wildcard,
    Column(ColumnName),
    Function(FunctionCall),
    /// Any other expression; it has no bearing on the request.
    Other,
}

/// A table in the FROM clause, as a dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(pub Vec<String>);

/// A column reference, as a dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnName(pub Vec<String>);

/// A GROUP BY key.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupByKey {
    Column(ColumnName),
    Function(FunctionCall),
}

/// An ORDER BY element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByElement {
    pub column: ColumnName,
    pub direction: OrderByDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// LIMIT and OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    pub offset: Option<u64>,
    pub count: Option<u64>,
}

/// A scalar or boolean expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Comparison {
        left: Box<Expression>,
        operator: ComparisonOperator,
        right: Box<Expression>,
    },
    /// `left BETWEEN from AND to`
    Between {
        left: Box<Expression>,
        from: Box<Expression>,
        to: Box<Expression>,
    },
    /// A parenthesized expression.
    Nested(Box<Expression>),
    FunctionCall(FunctionCall),
    ColumnReference(ColumnName),
    Value(Literal),
    Tuple(Vec<Expression>),
    Not(Box<Expression>),
    IsNull {
        expression: Box<Expression>,
        negated: bool,
    },
    /// An expression we cannot represent, with a short description.
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    Like,
    NotLike,
}

/// A literal value, already unquoted and unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    /// The number as written in the source text.
    Number(String),
    Boolean(bool),
    Null,
}

/// A function call: `name(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<FunctionArgument>,
    /// `name(DISTINCT ...)`
    pub distinct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgument {
    Unnamed(Expression),
    /// `name => value`
    Named {
        name: String,
        value: Expression,
    },
    Wildcard,
}

impl TableName {
    pub fn to_dotted(&self) -> String {
        self.0.join(".")
    }
}

impl ColumnName {
    pub fn from_name(name: &str) -> ColumnName {
        ColumnName(vec![name.to_string()])
    }

    /// The full dotted path, e.g. `a.b`.
    pub fn to_dotted(&self) -> String {
        self.0.join(".")
    }

    /// The last path segment.
    pub fn name(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }
}

impl Literal {
    /// The literal as plain text, without quotes.
    pub fn to_text(&self) -> String {
        match self {
            Literal::String(s) | Literal::Number(s) => s.clone(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Null => "null".to_string(),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let operator = match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::In => "in",
            ComparisonOperator::NotIn => "not in",
            ComparisonOperator::Like => "like",
            ComparisonOperator::NotLike => "not like",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dotted())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{s}'"),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        for (index, argument) in self.args.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{argument}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for FunctionArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionArgument::Unnamed(expression) => write!(f, "{expression}"),
            FunctionArgument::Named { name, value } => write!(f, "{name} => {value}"),
            FunctionArgument::Wildcard => write!(f, "*"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::And { left, right } => write!(f, "{left} AND {right}"),
            Expression::Or { left, right } => write!(f, "{left} OR {right}"),
            Expression::Comparison {
                left,
                operator,
                right,
            } => write!(f, "{left} {operator} {right}"),
            Expression::Between { left, from, to } => {
                write!(f, "{left} BETWEEN {from} AND {to}")
            }
            Expression::Nested(inner) => write!(f, "({inner})"),
            Expression::FunctionCall(function) => write!(f, "{function}"),
            Expression::ColumnReference(column) => write!(f, "{column}"),
            Expression::Value(literal) => write!(f, "{literal}"),
            Expression::Tuple(items) => {
                write!(f, "(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Expression::Not(inner) => write!(f, "NOT {inner}"),
            Expression::IsNull {
                expression,
                negated: false,
            } => write!(f, "{expression} IS NULL"),
            Expression::IsNull {
                expression,
                negated: true,
            } => write!(f, "{expression} IS NOT NULL"),
            Expression::Unsupported(description) => write!(f, "{description}"),
        }
    }
}
