use keyed_forest::{ByKeyAndValue, Forest, Node, Value};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn node(forest: &mut Forest, key: &str) -> Node {
    let node = Node::new(key);
    forest.make_set(&node, true);
    node
}

#[test]
fn eleven_nodes() {
    init_logger();

    let mut forest = Forest::new();
    let n: Vec<Node> = (1..=11u32).map(|i| node(&mut forest, &i.to_string())).collect();
    let at = |key: usize| &n[key - 1];
    assert_eq!(11, forest.size());

    for &(x, y) in &[(1, 2), (3, 4), (5, 6), (7, 8), (9, 10), (9, 11)] {
        assert!(forest.union(at(x), at(y)));
    }
    assert_eq!(5, forest.size());

    forest.union(at(1), at(3));
    forest.union(at(5), at(7));
    assert_eq!(3, forest.size());

    forest.union(at(5), at(9));
    assert_eq!(2, forest.size());

    // Already together.
    assert!(!forest.union(at(6), at(11)));
    assert_eq!(2, forest.size());

    let mut left = Forest::by_id(&forest.copy_set(at(4)));
    left.sort();
    assert_eq!(vec!["1", "2", "3", "4"], left);

    let mut right = Forest::by_id(&forest.copy_set(at(10)));
    right.sort_by_key(|key| key.parse::<u32>().unwrap_or(0));
    assert_eq!(vec!["5", "6", "7", "8", "9", "10", "11"], right);

    assert_eq!(Ok(()), forest.validate());
}

#[test]
fn union_is_symmetric() {
    init_logger();

    let mut forest = Forest::new();
    let a = node(&mut forest, "a");
    let b = node(&mut forest, "b");
    let c = node(&mut forest, "c");
    let d = node(&mut forest, "d");

    forest.union(&a, &b);
    forest.union(&d, &c);
    assert_eq!(forest.find(&a), forest.find(&b));
    assert_eq!(forest.find(&c), forest.find(&d));
    assert_ne!(forest.find(&a), forest.find(&d));
}

#[test]
fn prewired_group_is_one_set() {
    init_logger();

    let n: Node = Node::new("n");
    let n1: Node = Node::new("n1");
    let n2: Node = Node::new("n2");

    n.set_parent(&n);
    n1.set_parent(&n);
    n2.set_parent(&n);
    n.set_next(&n1);
    n1.set_next(&n2);
    n2.set_next(&n);

    let mut forest = Forest::new();
    forest.make_set(&n, false);
    assert_eq!(1, forest.size());

    assert_eq!(Some(n.clone()), forest.find(&n2));
    assert_eq!(vec!["n", "n1", "n2"], Forest::by_id(&forest.copy_set(&n1)));

    let lone = node(&mut forest, "lone");
    forest.union(&lone, &n1);
    assert_eq!(1, forest.size());
    assert_eq!(4, forest.copy_set(&lone).len());
}

#[test]
fn circular_lists_close() {
    init_logger();

    let mut forest = Forest::new();
    let n: Vec<Node> = (0..9u32).map(|i| node(&mut forest, &i.to_string())).collect();
    for i in 1..9 {
        forest.union(&n[i % 3], &n[i]);
    }

    for member in &n {
        let len = forest.copy_set(member).len();
        assert_eq!(len, member.members().count());

        let mut cursor = member.next().unwrap();
        let mut steps = 1;
        while !Node::ptr_eq(&cursor, member) {
            cursor = cursor.next().unwrap();
            steps += 1;
        }
        assert_eq!(len, steps);
    }
}

#[test]
fn lookups_by_key() {
    init_logger();

    let mut forest = Forest::new();
    let a = node(&mut forest, "a");
    let b = node(&mut forest, "b");
    forest.union(&a, &b);

    assert!(Node::ptr_eq(&a, &forest.find_by_id("a").unwrap()));

    let copy = forest.find_by_id("b").unwrap();
    copy.set_value(Some(Value::from("changed")));
    assert_eq!(None, b.value());

    assert!(forest.find_by_id("z").is_none());
}

#[test]
fn clone_is_independent() {
    init_logger();

    let mut forest: Forest<u32> = Forest::new();
    let nodes: Vec<Node<u32>> = (0..4u32).map(|i| {
        let node = Node::with_data(i.to_string(), i);
        forest.make_set(&node, true);
        node
    }).collect();
    forest.union(&nodes[0], &nodes[1]);
    forest.union(&nodes[2], &nodes[3]);

    let copy = forest.clone();
    assert_eq!(forest.size(), copy.size());

    for root in copy.representatives() {
        for member in root.members() {
            member.replace_data(Some(99));
            member.set_value(Some(Value::from(1)));
        }
    }

    for node in &nodes {
        assert_ne!(Some(99), node.clone_data());
        assert_eq!(None, node.value());
    }

    nodes[1].replace_data(Some(7));
    let copied = copy.representatives()
        .flat_map(|root| root.members())
        .find(|member| member.key() == "1")
        .unwrap();
    assert_eq!(Some(99), copied.clone_data());
}

#[test]
fn colliding_keys_told_apart_by_value() {
    init_logger();

    let mut forest: Forest<(), ByKeyAndValue> = Forest::new();
    let red: Node<(), ByKeyAndValue> = Node::with_value("apple", "red");
    let green: Node<(), ByKeyAndValue> = Node::with_value("apple", "green");
    forest.make_set(&red, true);
    forest.make_set(&green, true);

    assert!(!forest.equiv(&red, &green));
    assert!(forest.union(&red, &green));
    assert_eq!(1, forest.size());
    assert!(forest.equiv(&red, &green));
    assert_eq!(2, forest.copy_set(&green).len());
}
