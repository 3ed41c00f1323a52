//! Parse SQL text with `sqlparser` and lower its AST into our statement model.

use sqlparser::ast as sql;
use sqlparser::dialect::{Dialect, MySqlDialect};
use sqlparser::keywords::Keyword;
use sqlparser::parser::{Parser, ParserError};
use sqlparser::tokenizer::{Token, TokenWithLocation, Tokenizer};

use super::ast::*;
use super::error::Error;

/// Parse a single statement using the MySQL dialect.
pub fn parse(sql_text: &str) -> Result<Statement, Error> {
    parse_with_dialect(sql_text, &MySqlDialect {})
}

/// Parse a single statement using the given dialect.
pub fn parse_with_dialect(sql_text: &str, dialect: &dyn Dialect) -> Result<Statement, Error> {
    let tokens = Tokenizer::new(dialect, sql_text)
        .tokenize_with_location()
        .map_err(ParserError::from)?;
    let mut statements = Parser::new(dialect)
        .with_tokens_with_locations(unreserve_parameter_names(tokens))
        .parse_statements()?;
    if statements.len() != 1 {
        return Err(Error::StatementCount(statements.len()));
    }
    let statement = lower_statement(statements.remove(0))?;
    tracing::debug!("Statement: {:?}", statement);
    Ok(statement)
}

/// `interval` followed by `=` or `=>` names a function parameter, as in
/// `date_histogram(field='create_time', interval='1h')`, rather than starting
/// an `INTERVAL '1' HOUR` literal.
fn unreserve_parameter_names(mut tokens: Vec<TokenWithLocation>) -> Vec<TokenWithLocation> {
    for index in 0..tokens.len() {
        let is_parameter_name = match &tokens[index].token {
            Token::Word(word) => {
                word.keyword == Keyword::INTERVAL
                    && word.quote_style.is_none()
                    && matches!(
                        next_significant_token(&tokens[index + 1..]),
                        Some(Token::Eq | Token::RArrow)
                    )
            }
            _ => false,
        };
        if is_parameter_name {
            if let Token::Word(word) = &mut tokens[index].token {
                word.keyword = Keyword::NoKeyword;
            }
        }
    }
    tokens
}

fn next_significant_token(tokens: &[TokenWithLocation]) -> Option<&Token> {
    tokens
        .iter()
        .map(|token| &token.token)
        .find(|token| !matches!(token, Token::Whitespace(_)))
}

fn lower_statement(statement: sql::Statement) -> Result<Statement, Error> {
    match statement {
        sql::Statement::Query(query) => Ok(Statement::Select(Box::new(lower_query(*query)?))),
        sql::Statement::Insert { .. } => Ok(Statement::Insert),
        sql::Statement::Update { .. } => Ok(Statement::Update),
        sql::Statement::Delete { .. } => Ok(Statement::Delete),
        other => Ok(Statement::Other(statement_kind(&other))),
    }
}

/// The leading keyword of a statement, e.g. `CREATE`.
fn statement_kind(statement: &sql::Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

fn lower_query(query: sql::Query) -> Result<Select, Error> {
    if query.with.is_some() {
        return Err(Error::NotSupported("WITH clauses".to_string()));
    }
    let select = match *query.body {
        sql::SetExpr::Select(select) => *select,
        _ => return Err(Error::NotSupported("set operations".to_string())),
    };
    if select.having.is_some() {
        return Err(Error::NotSupported("HAVING clauses".to_string()));
    }

    let projection = select
        .projection
        .into_iter()
        .map(lower_select_item)
        .collect();

    let from = select
        .from
        .into_iter()
        .map(lower_table)
        .collect::<Result<Vec<_>, Error>>()?;

    let selection = select.selection.map(lower_expression);

    let group_by = match select.group_by {
        sql::GroupByExpr::All => return Err(Error::NotSupported("GROUP BY ALL".to_string())),
        sql::GroupByExpr::Expressions(expressions) => expressions
            .into_iter()
            .map(lower_group_by_key)
            .collect::<Result<Vec<_>, Error>>()?,
    };

    let order_by = query
        .order_by
        .into_iter()
        .map(lower_order_by)
        .collect::<Result<Vec<_>, Error>>()?;

    let limit = Limit {
        offset: query
            .offset
            .map(|offset| lower_row_count("OFFSET", &offset.value))
            .transpose()?,
        count: query
            .limit
            .map(|limit| lower_row_count("LIMIT", &limit))
            .transpose()?,
    };

    Ok(Select {
        projection,
        from,
        selection,
        group_by,
        order_by,
        limit,
    })
}

fn lower_select_item(item: sql::SelectItem) -> SelectItem {
    match item {
        sql::SelectItem::UnnamedExpr(expr) | sql::SelectItem::ExprWithAlias { expr, .. } => {
            lower_select_expression(expr)
        }
        sql::SelectItem::Wildcard(..) | sql::SelectItem::QualifiedWildcard(..) => {
            SelectItem::Wildcard
        }
    }
}

fn lower_select_expression(expr: sql::Expr) -> SelectItem {
    match expr {
        sql::Expr::Identifier(ident) => SelectItem::Column(ColumnName(vec![ident.value])),
        sql::Expr::CompoundIdentifier(idents) => SelectItem::Column(ident_path(idents)),
        sql::Expr::Function(function) => SelectItem::Function(lower_function(function)),
        sql::Expr::Nested(inner) => lower_select_expression(*inner),
        _ => SelectItem::Other,
    }
}

fn lower_table(table: sql::TableWithJoins) -> Result<TableName, Error> {
    if !table.joins.is_empty() {
        return Err(Error::NotSupported("joins".to_string()));
    }
    match table.relation {
        sql::TableFactor::Table { name, .. } => Ok(TableName(
            name.0.into_iter().map(|ident| ident.value).collect(),
        )),
        other => Err(Error::NotSupported(format!("FROM {other}"))),
    }
}

fn lower_group_by_key(expr: sql::Expr) -> Result<GroupByKey, Error> {
    match expr {
        sql::Expr::Identifier(ident) => Ok(GroupByKey::Column(ColumnName(vec![ident.value]))),
        sql::Expr::CompoundIdentifier(idents) => Ok(GroupByKey::Column(ident_path(idents))),
        sql::Expr::Function(function) => Ok(GroupByKey::Function(lower_function(function))),
        sql::Expr::Nested(inner) => lower_group_by_key(*inner),
        other => Err(Error::NotSupported(format!("GROUP BY {other}"))),
    }
}

fn lower_order_by(element: sql::OrderByExpr) -> Result<OrderByElement, Error> {
    let column = match element.expr {
        sql::Expr::Identifier(ident) => ColumnName(vec![ident.value]),
        sql::Expr::CompoundIdentifier(idents) => ident_path(idents),
        other => return Err(Error::NotSupported(format!("ORDER BY {other}"))),
    };
    let direction = match element.asc {
        Some(false) => OrderByDirection::Desc,
        Some(true) | None => OrderByDirection::Asc,
    };
    Ok(OrderByElement { column, direction })
}

fn lower_row_count(clause: &'static str, expr: &sql::Expr) -> Result<u64, Error> {
    match expr {
        sql::Expr::Value(sql::Value::Number(number, _)) => {
            number.parse::<u64>().map_err(|_| Error::InvalidLimit {
                clause,
                value: number.clone(),
            })
        }
        other => Err(Error::InvalidLimit {
            clause,
            value: other.to_string(),
        }),
    }
}

/// Lower a scalar or boolean expression. Shapes we cannot represent become
/// `Expression::Unsupported`, and are rejected by whoever consumes them.
pub fn lower_expression(expr: sql::Expr) -> Expression {
    match expr {
        sql::Expr::Identifier(ident) => Expression::ColumnReference(ColumnName(vec![ident.value])),
        sql::Expr::CompoundIdentifier(idents) => Expression::ColumnReference(ident_path(idents)),
        sql::Expr::Value(value) => lower_value(value),
        sql::Expr::Nested(inner) => Expression::Nested(Box::new(lower_expression(*inner))),
        sql::Expr::BinaryOp { left, op, right } => lower_binary_op(*left, &op, *right),
        sql::Expr::UnaryOp {
            op: sql::UnaryOperator::Not,
            expr,
        } => Expression::Not(Box::new(lower_expression(*expr))),
        sql::Expr::UnaryOp {
            op: sql::UnaryOperator::Plus,
            expr,
        } => lower_expression(*expr),
        sql::Expr::UnaryOp {
            op: sql::UnaryOperator::Minus,
            expr,
        } => match *expr {
            sql::Expr::Value(sql::Value::Number(number, _)) => {
                Expression::Value(Literal::Number(format!("-{number}")))
            }
            other => Expression::Unsupported(format!("-{other}")),
        },
        sql::Expr::InList {
            expr,
            list,
            negated,
        } => Expression::Comparison {
            left: Box::new(lower_expression(*expr)),
            operator: if negated {
                ComparisonOperator::NotIn
            } else {
                ComparisonOperator::In
            },
            right: Box::new(Expression::Tuple(
                list.into_iter().map(lower_expression).collect(),
            )),
        },
        sql::Expr::Between {
            expr,
            negated,
            low,
            high,
        } => {
            let between = Expression::Between {
                left: Box::new(lower_expression(*expr)),
                from: Box::new(lower_expression(*low)),
                to: Box::new(lower_expression(*high)),
            };
            if negated {
                Expression::Not(Box::new(between))
            } else {
                between
            }
        }
        sql::Expr::Like {
            negated,
            expr,
            pattern,
            ..
        } => Expression::Comparison {
            left: Box::new(lower_expression(*expr)),
            operator: if negated {
                ComparisonOperator::NotLike
            } else {
                ComparisonOperator::Like
            },
            right: Box::new(lower_expression(*pattern)),
        },
        sql::Expr::IsNull(expr) => Expression::IsNull {
            expression: Box::new(lower_expression(*expr)),
            negated: false,
        },
        sql::Expr::IsNotNull(expr) => Expression::IsNull {
            expression: Box::new(lower_expression(*expr)),
            negated: true,
        },
        sql::Expr::Function(function) => Expression::FunctionCall(lower_function(function)),
        sql::Expr::Tuple(items) => {
            Expression::Tuple(items.into_iter().map(lower_expression).collect())
        }
        other => Expression::Unsupported(other.to_string()),
    }
}

fn lower_binary_op(left: sql::Expr, op: &sql::BinaryOperator, right: sql::Expr) -> Expression {
    let left = Box::new(lower_expression(left));
    let right = Box::new(lower_expression(right));
    let operator = match op {
        sql::BinaryOperator::And => return Expression::And { left, right },
        sql::BinaryOperator::Or => return Expression::Or { left, right },
        sql::BinaryOperator::Eq => ComparisonOperator::Equal,
        sql::BinaryOperator::NotEq => ComparisonOperator::NotEqual,
        sql::BinaryOperator::Gt => ComparisonOperator::GreaterThan,
        sql::BinaryOperator::GtEq => ComparisonOperator::GreaterThanOrEqual,
        sql::BinaryOperator::Lt => ComparisonOperator::LessThan,
        sql::BinaryOperator::LtEq => ComparisonOperator::LessThanOrEqual,
        other => return Expression::Unsupported(format!("the {other} operator")),
    };
    Expression::Comparison {
        left,
        operator,
        right,
    }
}

fn lower_value(value: sql::Value) -> Expression {
    match value {
        sql::Value::Number(number, _) => Expression::Value(Literal::Number(number)),
        sql::Value::SingleQuotedString(s) | sql::Value::DoubleQuotedString(s) => {
            Expression::Value(Literal::String(s))
        }
        sql::Value::Boolean(b) => Expression::Value(Literal::Boolean(b)),
        sql::Value::Null => Expression::Value(Literal::Null),
        other => Expression::Unsupported(other.to_string()),
    }
}

fn lower_function(function: sql::Function) -> FunctionCall {
    let name = function
        .name
        .0
        .iter()
        .map(|ident| ident.value.as_str())
        .collect::<Vec<_>>()
        .join(".");
    FunctionCall {
        name,
        args: function
            .args
            .into_iter()
            .map(lower_function_argument)
            .collect(),
        distinct: function.distinct,
    }
}

fn lower_function_argument(argument: sql::FunctionArg) -> FunctionArgument {
    match argument {
        sql::FunctionArg::Named { name, arg, .. } => FunctionArgument::Named {
            name: name.value,
            value: match arg {
                sql::FunctionArgExpr::Expr(expr) => lower_expression(expr),
                other => Expression::Unsupported(other.to_string()),
            },
        },
        sql::FunctionArg::Unnamed(sql::FunctionArgExpr::Expr(expr)) => {
            FunctionArgument::Unnamed(lower_expression(expr))
        }
        sql::FunctionArg::Unnamed(
            sql::FunctionArgExpr::Wildcard | sql::FunctionArgExpr::QualifiedWildcard(_),
        ) => FunctionArgument::Wildcard,
    }
}

fn ident_path(idents: Vec<sql::Ident>) -> ColumnName {
    ColumnName(idents.into_iter().map(|ident| ident.value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn parse_select(sql_text: &str) -> Select {
        match parse(sql_text).unwrap() {
            Statement::Select(select) => *select,
            other => panic!("expected a select, got {other:?}"),
        }
    }

    fn column(name: &str) -> Box<Expression> {
        Box::new(Expression::ColumnReference(ColumnName::from_name(name)))
    }

    fn number(n: &str) -> Box<Expression> {
        Box::new(Expression::Value(Literal::Number(n.to_string())))
    }

    #[test]
    fn it_lowers_a_simple_select() {
        let select = parse_select("select occupy from ark where process_id = 1");
        assert_eq!(
            select,
            Select {
                projection: vec![SelectItem::Column(ColumnName::from_name("occupy"))],
                from: vec![TableName(vec!["ark".to_string()])],
                selection: Some(Expression::Comparison {
                    left: column("process_id"),
                    operator: ComparisonOperator::Equal,
                    right: number("1"),
                }),
                group_by: vec![],
                order_by: vec![],
                limit: Limit::default(),
            }
        );
    }

    #[test]
    fn it_keeps_parentheses() {
        let select = parse_select("select * from ark where (a = 1)");
        assert_eq!(select.projection, vec![SelectItem::Wildcard]);
        assert_eq!(
            select.selection,
            Some(Expression::Nested(Box::new(Expression::Comparison {
                left: column("a"),
                operator: ComparisonOperator::Equal,
                right: number("1"),
            })))
        );
    }

    #[test]
    fn it_lowers_negated_predicates() {
        let select = parse_select(
            "select * from ark where a not in (1, 2) and b not like '%x%' and c not between 1 and 2",
        );
        let Some(Expression::And { left, right }) = select.selection else {
            panic!("expected a conjunction");
        };
        let Expression::And {
            left: not_in,
            right: not_like,
        } = *left
        else {
            panic!("expected a conjunction");
        };
        assert_eq!(
            *not_in,
            Expression::Comparison {
                left: column("a"),
                operator: ComparisonOperator::NotIn,
                right: Box::new(Expression::Tuple(vec![*number("1"), *number("2")])),
            }
        );
        assert_eq!(
            *not_like,
            Expression::Comparison {
                left: column("b"),
                operator: ComparisonOperator::NotLike,
                right: Box::new(Expression::Value(Literal::String("%x%".to_string()))),
            }
        );
        assert_eq!(
            *right,
            Expression::Not(Box::new(Expression::Between {
                left: column("c"),
                from: number("1"),
                to: number("2"),
            }))
        );
    }

    #[test]
    fn it_lowers_not_and_null_checks() {
        let select = parse_select("select * from ark where not a is null");
        assert_eq!(
            select.selection,
            Some(Expression::Not(Box::new(Expression::IsNull {
                expression: column("a"),
                negated: false,
            })))
        );
    }

    #[test]
    fn it_lowers_negative_numbers() {
        let select = parse_select("select * from ark where a > -5");
        assert_eq!(
            select.selection,
            Some(Expression::Comparison {
                left: column("a"),
                operator: ComparisonOperator::GreaterThan,
                right: number("-5"),
            })
        );
    }

    #[test]
    fn it_lowers_group_by_functions() {
        let select = parse_select(
            "select count(*) from ark group by date_histogram(field='create_time'), id",
        );
        assert_eq!(
            select.projection,
            vec![SelectItem::Function(FunctionCall {
                name: "count".to_string(),
                args: vec![FunctionArgument::Wildcard],
                distinct: false,
            })]
        );
        assert_eq!(
            select.group_by,
            vec![
                GroupByKey::Function(FunctionCall {
                    name: "date_histogram".to_string(),
                    args: vec![FunctionArgument::Unnamed(Expression::Comparison {
                        left: column("field"),
                        operator: ComparisonOperator::Equal,
                        right: Box::new(Expression::Value(Literal::String(
                            "create_time".to_string()
                        ))),
                    })],
                    distinct: false,
                }),
                GroupByKey::Column(ColumnName::from_name("id")),
            ]
        );
    }

    #[test]
    fn interval_can_name_a_parameter() {
        for sql_text in [
            "select count(*) from ark group by date_histogram(field='create_time', interval='1h')",
            "select count(*) from ark group by date_histogram(field='create_time', INTERVAL = '1h')",
            "select count(*) from ark group by date_histogram(field='create_time', `interval`='1h')",
        ] {
            let select = parse_select(sql_text);
            let GroupByKey::Function(function) = &select.group_by[0] else {
                panic!("expected a function key in {sql_text}");
            };
            let FunctionArgument::Unnamed(Expression::Comparison { left, right, .. }) =
                &function.args[1]
            else {
                panic!("expected a comparison argument in {sql_text}");
            };
            let Expression::ColumnReference(name) = left.as_ref() else {
                panic!("expected a column in {sql_text}");
            };
            assert_eq!(name.name().to_ascii_lowercase(), "interval", "{sql_text}");
            assert_eq!(
                right.as_ref(),
                &Expression::Value(Literal::String("1h".to_string())),
                "{sql_text}"
            );
        }
    }

    #[test]
    fn interval_literals_are_still_parsed() {
        let select = parse_select("select * from ark where a > interval '1' day");
        assert!(matches!(
            &select.selection,
            Some(Expression::Comparison { right, .. }) if matches!(**right, Expression::Unsupported(_))
        ));
    }

    #[test]
    fn it_lowers_order_by_and_limit() {
        let select =
            parse_select("select * from ark order by id asc, order_id desc, x limit 10 offset 5");
        assert_eq!(
            select.order_by,
            vec![
                OrderByElement {
                    column: ColumnName::from_name("id"),
                    direction: OrderByDirection::Asc,
                },
                OrderByElement {
                    column: ColumnName::from_name("order_id"),
                    direction: OrderByDirection::Desc,
                },
                OrderByElement {
                    column: ColumnName::from_name("x"),
                    direction: OrderByDirection::Asc,
                },
            ]
        );
        assert_eq!(
            select.limit,
            Limit {
                offset: Some(5),
                count: Some(10),
            }
        );
    }

    #[test]
    fn it_keeps_qualified_and_quoted_names() {
        let select = parse_select("select * from `order`.abcd where a.`by` = 1");
        assert_eq!(
            select.from,
            vec![TableName(vec!["order".to_string(), "abcd".to_string()])]
        );
        assert_eq!(
            select.selection,
            Some(Expression::Comparison {
                left: Box::new(Expression::ColumnReference(ColumnName(vec![
                    "a".to_string(),
                    "by".to_string()
                ]))),
                operator: ComparisonOperator::Equal,
                right: number("1"),
            })
        );
    }

    #[test]
    fn it_classifies_other_statements() {
        assert_eq!(parse("insert into a values(1,2)").unwrap(), Statement::Insert);
        assert_eq!(parse("update a set id = 1").unwrap(), Statement::Update);
        assert_eq!(parse("delete from a where id=1").unwrap(), Statement::Delete);
    }

    #[test]
    fn it_rejects_joins() {
        let err = parse("select * from a join b on a.id = b.id").unwrap_err();
        assert_eq!(err.to_string(), "Statements containing joins are not supported.");
    }

    #[test]
    fn it_rejects_several_statements() {
        let err = parse("select * from a; select * from b").unwrap_err();
        assert_eq!(err.to_string(), "Expected exactly one statement, found 2.");
    }

    #[test]
    fn it_rejects_syntax_errors() {
        assert!(matches!(
            parse("select * from ark where"),
            Err(Error::Syntax(_))
        ));
    }
}
