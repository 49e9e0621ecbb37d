//! Built-in reference data.
//!
//! Every ingredient tag named by a food or restriction row must appear in
//! [`INGREDIENTS`]. Implications are closed transitively when the knowledge
//! base is built, so a row only lists its direct parents.

pub(crate) struct IngredientRow {
  pub tag:     &'static str,
  pub aliases: &'static [&'static str],
  pub implies: &'static [&'static str],
}

pub(crate) struct FoodRow {
  pub name:        &'static str,
  pub aliases:     &'static [&'static str],
  pub ingredients: &'static [&'static str],
}

pub(crate) struct RestrictionRow {
  pub name:    &'static str,
  pub aliases: &'static [&'static str],
  pub forbids: &'static [&'static str],
}

const fn ing(
  tag: &'static str,
  aliases: &'static [&'static str],
  implies: &'static [&'static str],
) -> IngredientRow {
  IngredientRow {
    tag,
    aliases,
    implies,
  }
}

const fn food(
  name: &'static str,
  aliases: &'static [&'static str],
  ingredients: &'static [&'static str],
) -> FoodRow {
  FoodRow {
    name,
    aliases,
    ingredients,
  }
}

const fn diet(
  name: &'static str,
  aliases: &'static [&'static str],
  forbids: &'static [&'static str],
) -> RestrictionRow {
  RestrictionRow {
    name,
    aliases,
    forbids,
  }
}

// ─── Ingredients ─────────────────────────────────────────────────────────────

pub(crate) const INGREDIENTS: &[IngredientRow] = &[
  // Dairy
  ing("dairy", &["dairy products", "dairy product"], &[]),
  ing("lactose", &[], &[]),
  ing("milk", &["whole milk", "skim milk", "cow milk", "cows milk"], &[
    "dairy", "lactose",
  ]),
  ing("cream", &["heavy cream", "whipped cream", "sour cream"], &[
    "milk",
  ]),
  ing("cheese", &["cheeses"], &["milk"]),
  ing("butter", &[], &["dairy"]),
  ing("yogurt", &["yoghurt", "yogurts"], &["milk"]),
  // Animal products
  ing("egg", &["eggs"], &[]),
  ing("honey", &[], &[]),
  ing("gelatin", &["gelatine"], &[]),
  ing("meat", &["meats", "red meat"], &[]),
  ing("beef", &["ground beef", "veal"], &["meat"]),
  ing("pork", &["ham", "pig", "lard"], &["meat"]),
  ing("lamb", &["mutton"], &["meat"]),
  ing("poultry", &[], &["meat"]),
  ing("chicken", &[], &["poultry"]),
  ing("turkey", &[], &["poultry"]),
  ing("seafood", &[], &[]),
  ing("fish", &["fishes", "anchovy", "anchovies"], &["seafood"]),
  ing("shellfish", &["shellfishes", "crustaceans"], &["seafood"]),
  // Grains and starches
  ing("gluten", &[], &[]),
  ing("wheat", &["flour"], &["gluten"]),
  ing("oat", &["oats", "oatmeal", "porridge"], &[]),
  ing("rice", &[], &[]),
  ing("corn", &["maize"], &[]),
  ing("potato", &["potatoes", "spud", "spuds"], &[]),
  // Allergens and others
  ing("soy", &["soya", "soybean", "soybeans"], &[]),
  ing("peanut", &["peanuts", "groundnut", "groundnuts"], &[]),
  ing("tree nut", &["tree nuts", "nuts", "nut", "almond", "almonds"], &[]),
  ing("sesame", &["sesame seeds"], &[]),
  ing("chickpea", &["chickpeas", "garbanzo"], &[]),
  ing("coconut", &[], &[]),
  ing("tomato", &["tomatoes"], &[]),
  ing("garlic", &[], &[]),
  ing("onion", &["onions"], &[]),
  ing("mushroom", &["mushrooms"], &[]),
  ing("lettuce", &[], &[]),
  ing("strawberry", &["strawberries"], &[]),
  ing("cocoa", &["cacao"], &[]),
  ing("sugar", &[], &[]),
  ing("caffeine", &[], &[]),
  ing("alcohol", &["booze", "liquor"], &[]),
];

// ─── Foods ───────────────────────────────────────────────────────────────────

pub(crate) const FOODS: &[FoodRow] = &[
  // Dairy-based
  food("ice cream", &["ice creams", "gelato", "sundae", "frozen custard"], &[
    "milk", "cream", "sugar",
  ]),
  food("milkshake", &["milkshakes", "milk shake"], &["milk", "cream", "sugar"]),
  food("cheesecake", &[], &["cheese", "cream", "wheat", "egg", "sugar"]),
  food("latte", &["lattes", "cappuccino", "flat white"], &[
    "milk", "caffeine",
  ]),
  food("mac and cheese", &["macaroni and cheese", "mac n cheese"], &[
    "wheat", "cheese", "butter",
  ]),
  food("pizza", &["pizzas"], &["wheat", "cheese", "tomato"]),
  food("lasagna", &["lasagne"], &["wheat", "cheese", "beef", "tomato"]),
  food("quesadilla", &["quesadillas"], &["wheat", "cheese"]),
  food("risotto", &[], &["rice", "butter", "cheese"]),
  food("pesto", &[], &["tree nut", "cheese", "garlic"]),
  // Plant milks and substitutes
  food("almond milk", &[], &["tree nut"]),
  food("oat milk", &[], &["oat"]),
  food("soy milk", &["soya milk"], &["soy"]),
  food("coconut milk", &[], &["coconut"]),
  food("rice milk", &[], &["rice"]),
  food("vegan cheese", &["dairy free cheese", "plant based cheese"], &[
    "tree nut",
  ]),
  food("tofu", &[], &["soy"]),
  food("tempeh", &[], &["soy"]),
  food("edamame", &[], &["soy"]),
  food("soy sauce", &[], &["soy", "wheat"]),
  food("hummus", &[], &["chickpea", "sesame"]),
  food("falafel", &[], &["chickpea"]),
  food("peanut butter", &[], &["peanut"]),
  // Potato
  food("fries", &["french fries", "potato fries", "freedom fries"], &[
    "potato",
  ]),
  food("fish and chips", &["fish n chips", "chip shop chips"], &[
    "fish", "potato", "wheat",
  ]),
  food("hash browns", &["hash brown", "hashbrowns", "hashbrown"], &[
    "potato",
  ]),
  food("mashed potatoes", &["mashed potato", "mash"], &[
    "potato", "butter", "milk",
  ]),
  food("baked potato", &["baked potatoes", "jacket potato"], &["potato"]),
  food("potato chips", &["crisps"], &["potato"]),
  food("tater tots", &["tater tot"], &["potato"]),
  food("potato salad", &[], &["potato", "egg"]),
  // Meat
  food("bacon", &[], &["pork"]),
  food("sausage", &["sausages", "pepperoni", "salami", "chorizo"], &["pork"]),
  food("hot dog", &["hot dogs", "frankfurter"], &["pork", "wheat"]),
  food("dumplings", &["dumpling", "gyoza"], &["wheat", "pork"]),
  food("steak", &["steaks"], &["beef"]),
  food("burger", &["burgers", "hamburger", "hamburgers"], &[
    "beef", "wheat",
  ]),
  food("cheeseburger", &["cheeseburgers"], &["beef", "wheat", "cheese"]),
  food("taco", &["tacos"], &["corn", "beef"]),
  food("burrito", &["burritos"], &["wheat", "rice", "beef"]),
  food("chicken nuggets", &["nuggets"], &["chicken", "wheat"]),
  food("fried chicken", &[], &["chicken", "wheat", "egg"]),
  // Seafood
  food("sushi", &[], &["fish", "rice"]),
  food("sashimi", &[], &["fish"]),
  food("salmon", &[], &["fish"]),
  food("tuna", &[], &["fish"]),
  food("shrimp", &["shrimps", "prawn", "prawns"], &["shellfish"]),
  food("lobster", &[], &["shellfish"]),
  food("crab", &[], &["shellfish"]),
  // Eggs and baking
  food("omelette", &["omelet", "omelettes"], &["egg"]),
  food("scrambled eggs", &[], &["egg", "milk"]),
  food("pancakes", &["pancake", "waffle", "waffles", "crepes"], &[
    "wheat", "egg", "milk",
  ]),
  food("cake", &["cakes", "cupcake", "cupcakes"], &[
    "wheat", "egg", "butter", "sugar",
  ]),
  food("cookies", &["cookie", "biscuits"], &[
    "wheat", "butter", "egg", "sugar",
  ]),
  food("bread", &["toast", "baguette", "sourdough"], &["wheat"]),
  // "flour" alone is wheat; these win by longest match.
  food("rice flour", &[], &["rice"]),
  food("almond flour", &["almond meal"], &["tree nut"]),
  food("coconut flour", &[], &["coconut"]),
  food("oat flour", &[], &["oat"]),
  food("corn flour", &["cornmeal", "cornflour"], &["corn"]),
  food("chickpea flour", &["gram flour", "besan"], &["chickpea"]),
  food("sandwich", &["sandwiches"], &["wheat"]),
  food("pasta", &["spaghetti", "noodles", "macaroni", "penne"], &["wheat"]),
  food("ramen", &[], &["wheat", "egg"]),
  food("fried rice", &[], &["rice", "egg", "soy"]),
  // Sweets
  food("chocolate", &["milk chocolate"], &["cocoa", "milk", "sugar"]),
  food("dark chocolate", &[], &["cocoa", "sugar"]),
  food("nutella", &[], &["tree nut", "cocoa", "milk", "sugar"]),
  food("jello", &["jelly", "gummy bears", "gummies", "marshmallows"], &[
    "gelatin", "sugar",
  ]),
  // Drinks
  food("coffee", &["espresso"], &["caffeine"]),
  food("tea", &[], &["caffeine"]),
  food("beer", &["lager", "ale"], &["alcohol", "wheat"]),
  food("wine", &["red wine", "white wine"], &["alcohol"]),
  food("cocktails", &["cocktail"], &["alcohol"]),
  // Salads and sides
  food("salad", &["salads", "green salad"], &["lettuce"]),
  food("caesar salad", &[], &["lettuce", "egg", "cheese", "fish"]),
  food("ketchup", &[], &["tomato", "sugar"]),
];

// ─── Dietary restrictions ────────────────────────────────────────────────────

pub(crate) const RESTRICTIONS: &[RestrictionRow] = &[
  diet("vegan", &["strict vegan", "plant based"], &[
    "meat", "seafood", "dairy", "egg", "honey", "gelatin",
  ]),
  diet("vegetarian", &["veggie", "lacto ovo vegetarian"], &[
    "meat", "seafood", "gelatin",
  ]),
  diet("pescatarian", &["pescetarian"], &["meat"]),
  diet("lactose intolerant", &["lactose intolerance", "lactose free"], &[
    "dairy",
  ]),
  diet("dairy free", &["no dairy"], &["dairy"]),
  diet("gluten free", &["celiac", "coeliac", "gluten intolerant"], &[
    "gluten",
  ]),
  diet("kosher", &[], &["pork", "shellfish"]),
  diet("halal", &[], &["pork", "alcohol"]),
  diet("keto", &["ketogenic", "low carb"], &[
    "sugar", "wheat", "rice", "potato", "corn",
  ]),
  diet("teetotal", &["teetotaler", "sober", "alcohol free"], &["alcohol"]),
];
